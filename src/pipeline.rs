//! The worksheet enhancement pipeline: pull the text out of an uploaded PDF,
//! have it annotated with climate connections, and render the result back
//! into a downloadable PDF.
//!
//! Every outside service sits behind a trait so the pipeline can be wired to
//! any language model or vector store, and tested without one.

use crate::{Paginator, RenderError};
use log::{debug, info, warn};
use std::{fmt::Debug, path::Path};
use thiserror::Error;

/// Instructions sent with every enhancement request
pub const ENHANCEMENT_PROMPT: &str = "\
You are an expert educator enhancing worksheets with climate change concepts.

STRICT REQUIREMENTS:
1. Preserve all original content exactly as it is
2. Do not answer or fill in any blanks in the worksheet
3. Do not modify existing questions or content
4. Only add climate-related extensions in parentheses after existing questions
5. Keep all original formatting, blanks, and numbering

FORMATTING REQUIREMENTS:
1. Keep all original headers with double asterisks **like this**
2. Preserve all blank lines and spacing
3. Keep all original question numbers and formatting
4. Add climate-related content only in parentheses after existing content
5. Preserve all blank spaces (___) in the original text

Example of a correct enhancement:
Original:
**Cell Biology**
1. What is the function of mitochondria?

Enhanced:
**Cell Biology**
1. What is the function of mitochondria? (How might mitochondrial function be affected by rising temperatures due to climate change?)";

/// Instructions for naming a worksheet's subject when the caller gave none
pub const SUBJECT_PROMPT: &str = "You are an expert at identifying educational content and its \
subject area. Be very specific about the topic (e.g., 'Plant Biology - Chloroplast Structure \
and Function' rather than just 'Biology').";

/// The filename offered for a rendered worksheet
pub const DOWNLOAD_FILENAME: &str = "enhanced_worksheet.pdf";

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// How many examples are retrieved when the caller does not say
pub const DEFAULT_EXAMPLE_COUNT: usize = 3;

const EXAMPLE_SEPARATOR: &str = "\n\n---\n\n";

/// Errors from any stage of the pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to read the PDF: {0}")]
    Extraction(String),

    #[error("no text could be extracted from the PDF")]
    NoText,

    #[error("no content provided for PDF generation")]
    EmptyContent,

    #[error("enhancement failed: {0}")]
    Enhancement(String),

    #[error("example retrieval failed: {0}")]
    Retrieval(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Pulls plain text out of a PDF
pub trait TextExtractor: Send + Sync + Debug {
    /// Text of every page in order, each page followed by a newline
    fn extract(&self, pdf: &[u8]) -> Result<String, PipelineError>;
}

/// Annotates worksheet text, usually by asking a language model
pub trait TextEnhancer: Send + Sync + Debug {
    fn enhance(&self, request: &EnhancementRequest) -> Result<String, PipelineError>;

    /// Name the subject of a worksheet, see [SUBJECT_PROMPT]. Enhancers that
    /// cannot tell return [None] and the request goes out without one.
    fn identify_subject(&self, _text: &str) -> Result<Option<String>, PipelineError> {
        Ok(None)
    }
}

/// Finds previously enhanced worksheets similar to a new one
pub trait ExampleRetriever: Send + Sync + Debug {
    fn find_similar(&self, text: &str, limit: usize) -> Result<Vec<String>, PipelineError>;
}

/// Turns text into an embedding vector
pub trait Embedder: Send + Sync + Debug {
    fn embed(&self, text: &str) -> Result<Vec<f32>, PipelineError>;
}

/// Everything an enhancer needs to annotate one worksheet
#[derive(Debug, Clone, PartialEq)]
pub struct EnhancementRequest {
    pub system_prompt: String,
    pub subject_area: Option<String>,
    pub examples: Vec<String>,
    pub text: String,
}

impl EnhancementRequest {
    pub fn new(text: impl Into<String>) -> Self {
        EnhancementRequest {
            system_prompt: ENHANCEMENT_PROMPT.to_string(),
            subject_area: None,
            examples: Vec::new(),
            text: text.into(),
        }
    }

    pub fn with_subject_area(mut self, subject_area: Option<String>) -> Self {
        self.subject_area = subject_area;
        self
    }

    pub fn with_examples(mut self, examples: Vec<String>) -> Self {
        self.examples = examples;
        self
    }

    pub fn user_prompt(&self) -> String {
        format!("Enhance this worksheet:\n\n{}", self.text)
    }

    /// The retrieved examples as one block, or [None] without any
    pub fn examples_prompt(&self) -> Option<String> {
        if self.examples.is_empty() {
            None
        } else {
            Some(self.examples.join(EXAMPLE_SEPARATOR))
        }
    }
}

/// A rendered file ready to be served
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// [TextExtractor] backed by [lopdf]
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl TextExtractor for LopdfExtractor {
    fn extract(&self, pdf: &[u8]) -> Result<String, PipelineError> {
        let document = lopdf::Document::load_mem(pdf)
            .map_err(|e| PipelineError::Extraction(e.to_string()))?;

        let mut text = String::new();
        for page_number in document.get_pages().keys() {
            match document.extract_text(&[*page_number]) {
                Ok(page_text) => text.push_str(&page_text),
                Err(e) => warn!("skipping page {page_number}: {e}"),
            }
            text.push('\n');
        }
        Ok(text)
    }
}

/// An in-memory vector store of example worksheets
#[derive(Debug)]
pub struct ExampleStore<E: Embedder> {
    embedder: E,
    documents: Vec<(Vec<f32>, String)>,
}

impl<E: Embedder> ExampleStore<E> {
    pub fn new(embedder: E) -> Self {
        ExampleStore {
            embedder,
            documents: Vec::new(),
        }
    }

    pub fn add_document(&mut self, content: impl Into<String>) -> Result<(), PipelineError> {
        let content = content.into();
        let embedding = self.embedder.embed(&content)?;
        self.documents.push((embedding, content));
        Ok(())
    }

    /// Add the text of every `*.pdf` file in `dir`, in file name order.
    /// Files that cannot be read or hold no text are skipped; a missing
    /// directory adds nothing. Returns how many examples were added.
    pub fn load_pdfs(
        &mut self,
        extractor: &dyn TextExtractor,
        dir: &Path,
    ) -> Result<usize, PipelineError> {
        if !dir.is_dir() {
            warn!("no examples directory at {}", dir.display());
            return Ok(0);
        }

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_pdf = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
            if is_pdf && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut added = 0;
        for path in paths {
            let text = match std::fs::read(&path)
                .map_err(PipelineError::from)
                .and_then(|bytes| extractor.extract(&bytes))
            {
                Ok(text) => text,
                Err(e) => {
                    warn!("skipping example {}: {e}", path.display());
                    continue;
                }
            };
            if text.trim().is_empty() {
                warn!("no text in example {}", path.display());
                continue;
            }
            self.add_document(text)?;
            debug!("loaded example from {}", path.display());
            added += 1;
        }

        info!("loaded {added} examples from {}", dir.display());
        Ok(added)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl<E: Embedder> ExampleRetriever for ExampleStore<E> {
    /// Up to `limit` stored documents, most similar first
    fn find_similar(&self, text: &str, limit: usize) -> Result<Vec<String>, PipelineError> {
        let query = self.embedder.embed(text)?;

        let mut scored: Vec<(f32, &str)> = self
            .documents
            .iter()
            .map(|(embedding, content)| (cosine_similarity(&query, embedding), content.as_str()))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        Ok(scored
            .into_iter()
            .take(limit)
            .map(|(_, content)| content.to_string())
            .collect())
    }
}

/// Cosine of the angle between two vectors; 0 when either has no length or
/// their dimensions differ
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        warn!(
            "cannot compare embeddings of {} and {} dimensions",
            a.len(),
            b.len()
        );
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Extract, enhance and render worksheets with injected collaborators
#[derive(Debug)]
pub struct WorksheetPipeline<X, T> {
    extractor: X,
    enhancer: T,
    retriever: Option<Box<dyn ExampleRetriever>>,
    example_count: usize,
    paginator: Paginator,
}

impl<X: TextExtractor, T: TextEnhancer> WorksheetPipeline<X, T> {
    pub fn new(extractor: X, enhancer: T) -> Self {
        WorksheetPipeline {
            extractor,
            enhancer,
            retriever: None,
            example_count: DEFAULT_EXAMPLE_COUNT,
            paginator: Paginator::default(),
        }
    }

    /// Send similar worksheets along with each request
    pub fn with_retriever(mut self, retriever: Box<dyn ExampleRetriever>) -> Self {
        self.retriever = Some(retriever);
        self
    }

    pub fn with_example_count(mut self, count: usize) -> Self {
        self.example_count = count;
        self
    }

    pub fn with_paginator(mut self, paginator: Paginator) -> Self {
        self.paginator = paginator;
        self
    }

    /// Extract the text of `pdf` and return it annotated
    pub fn enhance_pdf(
        &self,
        pdf: &[u8],
        subject_area: Option<&str>,
    ) -> Result<String, PipelineError> {
        let text = self.extractor.extract(pdf)?;
        if text.trim().is_empty() {
            return Err(PipelineError::NoText);
        }
        info!("extracted {} characters from a {} byte PDF", text.len(), pdf.len());

        let examples = match &self.retriever {
            Some(retriever) => retriever.find_similar(&text, self.example_count)?,
            None => Vec::new(),
        };
        debug!("retrieved {} examples", examples.len());

        let subject_area = match subject_area.map(str::trim) {
            Some(subject) if !subject.is_empty() => Some(subject.to_string()),
            _ => self.enhancer.identify_subject(&text)?,
        };
        debug!("subject area: {subject_area:?}");

        let request = EnhancementRequest::new(text)
            .with_subject_area(subject_area)
            .with_examples(examples);
        let enhanced = self.enhancer.enhance(&request)?;
        info!("enhanced worksheet is {} characters", enhanced.len());
        Ok(enhanced)
    }

    /// Render annotated text into a downloadable PDF
    pub fn download(&self, text: &str) -> Result<Attachment, PipelineError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PipelineError::EmptyContent);
        }

        let bytes = self.paginator.render(text)?;
        info!("rendered {} byte worksheet", bytes.len());
        Ok(Attachment {
            filename: DOWNLOAD_FILENAME.to_string(),
            content_type: PDF_CONTENT_TYPE.to_string(),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct FixedText(&'static str);

    impl TextExtractor for FixedText {
        fn extract(&self, _pdf: &[u8]) -> Result<String, PipelineError> {
            Ok(self.0.to_string())
        }
    }

    /// Records the request and appends a note to every numbered line
    #[derive(Debug, Default)]
    struct Recorder {
        seen: Mutex<Vec<EnhancementRequest>>,
    }

    impl TextEnhancer for &Recorder {
        fn enhance(&self, request: &EnhancementRequest) -> Result<String, PipelineError> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(request.clone());
            }
            Ok(request
                .text
                .lines()
                .map(|line| match line.chars().next() {
                    Some(c) if c.is_ascii_digit() => format!("{line} (climate)"),
                    _ => line.to_string(),
                })
                .collect::<Vec<_>>()
                .join("\n"))
        }

        fn identify_subject(&self, text: &str) -> Result<Option<String>, PipelineError> {
            Ok(text.contains("cell").then(|| "Cell Biology".to_string()))
        }
    }

    #[derive(Debug)]
    struct Fixed(Vec<String>);

    impl ExampleRetriever for Fixed {
        fn find_similar(&self, _text: &str, limit: usize) -> Result<Vec<String>, PipelineError> {
            Ok(self.0.iter().take(limit).cloned().collect())
        }
    }

    /// Counts of a handful of letters
    #[derive(Debug)]
    struct LetterCounts;

    impl Embedder for LetterCounts {
        fn embed(&self, text: &str) -> Result<Vec<f32>, PipelineError> {
            Ok(['a', 'e', 'o', 'x']
                .iter()
                .map(|l| text.chars().filter(|c| c == l).count() as f32)
                .collect())
        }
    }

    #[test]
    fn requests_carry_the_prompt_and_examples() {
        let recorder = Recorder::default();
        let pipeline = WorksheetPipeline::new(FixedText("**Cells**\n1. What is a cell?\n"), &recorder)
            .with_retriever(Box::new(Fixed(vec![
                "first".to_string(),
                "second".to_string(),
                "third".to_string(),
                "fourth".to_string(),
            ])));

        let enhanced = pipeline
            .enhance_pdf(b"%PDF-", Some("biology"))
            .expect("enhances");
        assert_eq!(enhanced, "**Cells**\n1. What is a cell? (climate)");

        let seen = recorder.seen.lock().expect("not poisoned");
        let request = &seen[0];
        assert_eq!(request.system_prompt, ENHANCEMENT_PROMPT);
        assert_eq!(request.subject_area.as_deref(), Some("biology"));
        assert_eq!(
            request.user_prompt(),
            "Enhance this worksheet:\n\n**Cells**\n1. What is a cell?\n"
        );
        assert_eq!(
            request.examples_prompt().as_deref(),
            Some("first\n\n---\n\nsecond\n\n---\n\nthird")
        );
    }

    #[test]
    fn missing_subjects_are_identified() {
        let recorder = Recorder::default();
        let pipeline = WorksheetPipeline::new(FixedText("1. What is a cell?"), &recorder);
        pipeline.enhance_pdf(b"%PDF-", None).expect("enhances");
        pipeline.enhance_pdf(b"%PDF-", Some("  ")).expect("enhances");
        pipeline.enhance_pdf(b"%PDF-", Some("Ecology")).expect("enhances");

        let seen = recorder.seen.lock().expect("not poisoned");
        let subjects: Vec<Option<&str>> =
            seen.iter().map(|r| r.subject_area.as_deref()).collect();
        assert_eq!(
            subjects,
            vec![Some("Cell Biology"), Some("Cell Biology"), Some("Ecology")]
        );
    }

    #[test]
    fn subjects_stay_unset_when_the_enhancer_cannot_tell() {
        let recorder = Recorder::default();
        let pipeline = WorksheetPipeline::new(FixedText("1. Name a river."), &recorder);
        pipeline.enhance_pdf(b"%PDF-", None).expect("enhances");
        let seen = recorder.seen.lock().expect("not poisoned");
        assert_eq!(seen[0].subject_area, None);
    }

    #[test]
    fn blank_extraction_is_rejected() {
        let recorder = Recorder::default();
        let pipeline = WorksheetPipeline::new(FixedText(" \n\n"), &recorder);
        assert!(matches!(
            pipeline.enhance_pdf(b"%PDF-", None),
            Err(PipelineError::NoText)
        ));
        assert!(recorder.seen.lock().expect("not poisoned").is_empty());
    }

    #[test]
    fn downloads_are_named_pdfs() {
        let recorder = Recorder::default();
        let pipeline = WorksheetPipeline::new(FixedText(""), &recorder);

        let attachment = pipeline
            .download("**Cells**\n1. What is a cell?")
            .expect("renders");
        assert_eq!(attachment.filename, "enhanced_worksheet.pdf");
        assert_eq!(attachment.content_type, "application/pdf");
        assert!(attachment.bytes.starts_with(b"%PDF-"));

        assert!(matches!(
            pipeline.download("  \n "),
            Err(PipelineError::EmptyContent)
        ));
        assert!(matches!(
            pipeline.download("CO₂"),
            Err(PipelineError::Render(RenderError::Unencodable { .. }))
        ));
    }

    #[test]
    fn example_store_ranks_by_similarity() {
        let mut store = ExampleStore::new(LetterCounts);
        assert!(store.is_empty());
        store.add_document("aaaa").expect("embeds");
        store.add_document("eeee").expect("embeds");
        store.add_document("aaae").expect("embeds");
        store.add_document("").expect("embeds");
        assert_eq!(store.len(), 4);

        let found = store.find_similar("aa", DEFAULT_EXAMPLE_COUNT).expect("finds");
        assert_eq!(found, vec!["aaaa", "aaae", "eeee"]);
        assert_eq!(store.find_similar("eeee", 1).expect("finds"), vec!["eeee"]);
    }

    #[test]
    fn examples_load_from_a_directory_of_pdfs() {
        let dir = tempfile::tempdir().expect("temp dir");
        let write = |name: &str, text: &str| {
            let pdf = crate::render_pdf(text).expect("renders");
            std::fs::write(dir.path().join(name), pdf).expect("writes");
        };
        write("b.pdf", "**Oceans**\n1. Why do oceans absorb heat?");
        write("a.PDF", "**Cells**\n1. What is a cell?");
        write("blank.pdf", "");
        std::fs::write(dir.path().join("broken.pdf"), b"not a pdf").expect("writes");
        std::fs::write(dir.path().join("notes.txt"), b"ignored").expect("writes");

        let mut store = ExampleStore::new(LetterCounts);
        let added = store
            .load_pdfs(&LopdfExtractor, dir.path())
            .expect("loads");
        assert_eq!(added, 2);
        assert_eq!(store.len(), 2);
        assert!(store.documents[0].1.contains("Cells"));
        assert!(store.documents[1].1.contains("Oceans"));

        let missing = dir.path().join("missing");
        assert_eq!(store.load_pdfs(&LopdfExtractor, &missing).expect("loads"), 0);
    }

    #[test]
    fn mismatched_dimensions_have_no_similarity() {
        assert_eq!(cosine_similarity(&[1.0, 0.0, 5.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[1.0]), 0.0);
    }

    #[test]
    fn zero_vectors_have_no_similarity() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 0.0], &[2.0, 0.0]) - 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 3.0]), 0.0);
    }
}
