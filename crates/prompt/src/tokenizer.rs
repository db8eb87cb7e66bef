//! Final token assembly for prompt compressions

use clm_core::{Context, ExtractionField, Intent, OutputSchema, Req, Target};

/// Builds the compressed token sequence in the canonical order:
/// REQ, TARGET, EXTRACT, CTX..., OUT.
pub struct Tokenizer;

impl Tokenizer {
    pub fn build_sequence(
        intents: &[Intent],
        target: &Target,
        extractions: Option<&ExtractionField>,
        contexts: &[Context],
        output_format: Option<&OutputSchema>,
    ) -> String {
        let mut tokens = Vec::new();
        let primary = intents.first();

        let mut extract_embedded = false;
        if let Some(intent) = primary {
            let embeddable = extractions.filter(|e| !e.fields.is_empty() && intent.token == Req::Extract);
            if let Some(extraction) = embeddable {
                let mut req = format!("[REQ:EXTRACT:{}", extraction.fields.join(","));
                if !extraction.attributes.is_empty() {
                    let attrs: Vec<String> = extraction
                        .attributes
                        .iter()
                        .map(|(k, v)| format!("{k}={v}"))
                        .collect();
                    req.push_str(&format!(":{}", attrs.join(",")));
                }
                req.push(']');
                tokens.push(req);
                extract_embedded = true;
            } else if let Some(modifier) = &intent.modifier {
                tokens.push(format!("[REQ:{}:{modifier}]", intent.token));
            } else {
                tokens.push(format!("[REQ:{}]", intent.token));
            }
        }

        tokens.push(target.build_token());

        if !extract_embedded {
            if let Some(token) = extractions.and_then(|e| e.build_token()) {
                tokens.push(token);
            }
        }

        for context in contexts {
            let duplicates_modifier = primary
                .and_then(|i| i.modifier.as_deref())
                .map(|m| m == context.value)
                .unwrap_or(false);
            if !duplicates_modifier {
                tokens.push(context.build_token());
            }
        }

        if let Some(schema) = output_format {
            tokens.push(schema.build_token());
        }

        tokens.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clm_core::Aspect;
    use std::collections::BTreeMap;

    #[test]
    fn extract_fields_embed_into_the_req_token() {
        let intents = vec![Intent::new(Req::Extract, 1.0, "extract")];
        let target = Target::new("DATA");
        let extraction = ExtractionField {
            fields: vec!["NAMES".into(), "DATES".into()],
            attributes: BTreeMap::new(),
        };
        let out = Tokenizer::build_sequence(&intents, &target, Some(&extraction), &[], None);
        assert_eq!(out, "[REQ:EXTRACT:NAMES,DATES] [TARGET:DATA]");
    }

    #[test]
    fn standalone_extract_token_when_req_differs() {
        let intents = vec![Intent::new(Req::Analyze, 1.0, "analyze")];
        let target = Target::new("DOCUMENT");
        let extraction = ExtractionField {
            fields: vec!["ISSUE".into()],
            attributes: BTreeMap::new(),
        };
        let out = Tokenizer::build_sequence(&intents, &target, Some(&extraction), &[], None);
        assert_eq!(out, "[REQ:ANALYZE] [TARGET:DOCUMENT] [EXTRACT:ISSUE]");
    }

    #[test]
    fn modifier_valued_contexts_are_suppressed() {
        let mut intent = Intent::new(Req::Summarize, 1.0, "summarize");
        intent.modifier = Some("BRIEF".to_string());
        let target = Target::new("DOCUMENT");
        let contexts = vec![
            Context::new(Aspect::Length, "BRIEF"),
            Context::new(Aspect::Tone, "PROFESSIONAL"),
        ];
        let out = Tokenizer::build_sequence(&[intent], &target, None, &contexts, None);
        assert_eq!(
            out,
            "[REQ:SUMMARIZE:BRIEF] [TARGET:DOCUMENT] [CTX:TONE=PROFESSIONAL]"
        );
    }
}
