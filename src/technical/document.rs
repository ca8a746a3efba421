use crate::models::OrderedMap;
use serde::Deserialize;

/// Successful response of `POST /generar`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerationResponse {
    /// Object of the contract, used for the document title.
    pub objeto: String,
    pub indice: Vec<String>,
    /// Section name → generated text, in the order the service produced them.
    pub secciones: OrderedMap<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Markdown,
    PlainText,
}

impl DocumentFormat {
    pub fn assemble(&self, response: &GenerationResponse) -> String {
        match self {
            Self::Markdown => assemble_markdown(response),
            Self::PlainText => assemble_plain_text(response),
        }
    }
}

/// Builds the markdown handed to the editor: title, index bullets, then every section.
///
/// A `### ` heading is added before a section unless its content already opens with a
/// heading marker.
pub fn assemble_markdown(response: &GenerationResponse) -> String {
    let mut document = format!("## Pliego Técnico Generado ({}):\n\n", response.objeto);
    document.push_str("### Índice:\n");
    for item in &response.indice {
        document.push_str(&format!("- {item}\n"));
    }
    document.push('\n');

    for (title, content) in response.secciones.iter() {
        if !content.trim().starts_with('#') {
            document.push_str(&format!("### {}\n\n", title.trim()));
        }
        document.push_str(&format!("{content}\n\n"));
    }

    document
}

/// Plain-text rendition with upper-cased section titles and no markup.
pub fn assemble_plain_text(response: &GenerationResponse) -> String {
    let mut document = format!("PLIEGO TÉCNICO PARA: {}\n\n", response.objeto);
    document.push_str("ÍNDICE:\n");
    for item in &response.indice {
        document.push_str(&format!("- {item}\n"));
    }
    document.push('\n');

    for (title, content) in response.secciones.iter() {
        document.push_str(&format!("{}\n", title.trim().to_uppercase()));
        document.push_str(&format!("{}\n\n", content.trim()));
    }

    document
}
