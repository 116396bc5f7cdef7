use serde::{Deserialize, Serialize};

use crate::templates::{
    CONTEXT_LABEL, INSTRUCTIONS_LABEL, INSTRUCTION_TEMPLATES, PREAMBLE_TEMPLATE, QUESTION_LABEL,
    RESPONSE_CUE,
};

/// Who the assistant is and which company it speaks for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Persona {
    pub assistant_name: String,
    pub company_name: String,
    /// Name used inside instructions, e.g. "CapServ"
    pub short_name: String,
    pub company_description: String,
    /// Kind of general questions answered in persona, e.g. "financial or lending"
    pub general_domain: String,
    pub mission: String,
    pub focus: String,
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            assistant_name: "Cappy".to_string(),
            company_name: "CapServ Digital Lending".to_string(),
            short_name: "CapServ".to_string(),
            company_description: "a cutting-edge digital lending platform".to_string(),
            general_domain: "financial or lending".to_string(),
            mission: "digital lending".to_string(),
            focus: "digital lending, marketplace platforms, and financial technology solutions"
                .to_string(),
        }
    }
}

impl Persona {
    fn fill(&self, template: &str) -> String {
        template
            .replace("<assistant>", &self.assistant_name)
            .replace("<company_description>", &self.company_description)
            .replace("<company>", &self.company_name)
            .replace("<short_name>", &self.short_name)
            .replace("<general_domain>", &self.general_domain)
            .replace("<mission>", &self.mission)
            .replace("<focus>", &self.focus)
    }
}

/// Builds the single prompt string sent to the model.
///
/// Section order is fixed: persona preamble, company context, user question,
/// numbered instructions, then the `Response:` cue. Context and question are
/// inserted verbatim.
#[derive(Debug, Clone, Default)]
pub struct PromptComposer {
    persona: Persona,
}

impl PromptComposer {
    pub fn new(persona: Persona) -> Self {
        Self { persona }
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    pub fn compose(&self, query: &str, context: &str) -> String {
        let instructions = INSTRUCTION_TEMPLATES
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{}. {}", i + 1, self.persona.fill(line)))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "{preamble}\n\n{CONTEXT_LABEL}\n{context}\n\n{QUESTION_LABEL} {query}\n\n{INSTRUCTIONS_LABEL}\n{instructions}\n\n{RESPONSE_CUE}",
            preamble = self.persona.fill(PREAMBLE_TEMPLATE),
        )
    }
}
