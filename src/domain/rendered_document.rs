/// A span of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

/// One rendered line of markdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentParagraph {
    pub runs: Vec<Run>,
}

impl DocumentParagraph {
    pub fn new(runs: Vec<Run>) -> Self {
        Self { runs }
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// The paragraphs produced from one blank-line separated block of markdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParagraphBlock {
    pub paragraphs: Vec<DocumentParagraph>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    pub blocks: Vec<ParagraphBlock>,
}

impl RenderedDocument {
    pub fn paragraphs(&self) -> impl Iterator<Item = &DocumentParagraph> {
        self.blocks.iter().flat_map(|b| b.paragraphs.iter())
    }
}
