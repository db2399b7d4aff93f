mod helpers;

use replydesk::application::ports::{FileLoader, FileLoaderError};
use replydesk::domain::{ContentType, Document};
use replydesk::infrastructure::text_processing::{
    CompositeFileLoader, DocxAdapter, PdfAdapter, PlainTextAdapter,
};

use helpers::build_docx;

fn document(filename: &str, data: &[u8]) -> Document {
    Document::new(filename.to_string(), data.len() as u64)
}

#[test]
fn given_filenames_when_deriving_content_type_then_extension_is_case_insensitive() {
    assert_eq!(ContentType::from_filename("REPORT.PDF"), ContentType::Pdf);
    assert_eq!(ContentType::from_filename("letter.Docx"), ContentType::Docx);
    assert_eq!(ContentType::from_filename("notes.md"), ContentType::Text);
    assert_eq!(ContentType::from_filename("README"), ContentType::Text);
    assert_eq!(ContentType::from_filename("archive.pdf.txt"), ContentType::Text);
}

#[test]
fn given_upload_when_building_document_then_records_type_and_size() {
    let data = b"%PDF-1.7 body";

    let doc = document("Notice.Pdf", data);

    assert_eq!(doc.filename, "Notice.Pdf");
    assert_eq!(doc.content_type, ContentType::Pdf);
    assert_eq!(doc.size_bytes, data.len() as u64);
}

#[tokio::test]
async fn given_utf8_text_when_extracting_then_returns_it_unchanged() {
    let data = "Dear taxpayer,\nyour notice is attached.".as_bytes();

    let text = PlainTextAdapter
        .extract_text(data, &document("notice.txt", data))
        .await
        .unwrap();

    assert_eq!(text, "Dear taxpayer,\nyour notice is attached.");
}

#[tokio::test]
async fn given_invalid_utf8_when_extracting_text_then_replaces_instead_of_failing() {
    let data = b"caf\xff ok";

    let text = PlainTextAdapter
        .extract_text(data, &document("notes.log", data))
        .await
        .unwrap();

    assert!(text.starts_with("caf"));
    assert!(text.ends_with(" ok"));
    assert!(text.contains('\u{FFFD}'));
}

#[tokio::test]
async fn given_pdf_document_when_plain_text_adapter_extracts_then_returns_unsupported() {
    let data = b"%PDF-1.4";

    let result = PlainTextAdapter
        .extract_text(data, &document("scan.pdf", data))
        .await;

    assert!(matches!(
        result,
        Err(FileLoaderError::UnsupportedContentType(_))
    ));
}

#[tokio::test]
async fn given_docx_bytes_when_extracting_then_joins_paragraphs_with_newlines() {
    let data = build_docx(&[
        &[("First paragraph", false)],
        &[("Second ", false), ("bold", true), (" part", false)],
    ]);

    let text = DocxAdapter
        .extract_text(&data, &document("letter.docx", &data))
        .await
        .unwrap();

    assert_eq!(text, "First paragraph\nSecond bold part");
}

#[tokio::test]
async fn given_corrupt_docx_when_extracting_then_returns_extraction_failed() {
    let data = b"PK but not really";

    let result = DocxAdapter
        .extract_text(data, &document("broken.docx", data))
        .await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_corrupt_bytes_when_extracting_pdf_then_returns_extraction_failed() {
    let data = b"not a pdf at all";

    let result = PdfAdapter::new()
        .extract_text(data, &document("corrupt.pdf", data))
        .await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_text_document_when_pdf_adapter_extracts_then_returns_unsupported() {
    let data = b"plain";

    let result = PdfAdapter::new()
        .extract_text(data, &document("plain.txt", data))
        .await;

    assert!(matches!(
        result,
        Err(FileLoaderError::UnsupportedContentType(_))
    ));
}

#[tokio::test]
async fn given_standard_composite_when_extracting_then_dispatches_on_extension() {
    let loader = CompositeFileLoader::standard();
    let docx = build_docx(&[&[("from docx", false)]]);
    let text = b"from text";

    let from_docx = loader
        .extract_text(&docx, &document("Reply.DOCX", &docx))
        .await
        .unwrap();
    let from_text = loader
        .extract_text(text, &document("reply.csv", text))
        .await
        .unwrap();

    assert_eq!(from_docx, "from docx");
    assert_eq!(from_text, "from text");
}

#[tokio::test]
async fn given_composite_without_adapter_when_extracting_then_returns_unsupported() {
    let loader = CompositeFileLoader::new(Vec::new());
    let data = b"anything";

    let result = loader.extract_text(data, &document("a.txt", data)).await;

    assert!(matches!(
        result,
        Err(FileLoaderError::UnsupportedContentType(_))
    ));
}

#[test]
fn given_readable_pages_when_collecting_pdf_pages_then_keeps_page_order() {
    let pages = PdfAdapter::collect_pages(3, |i| Ok::<_, String>(format!("page {}", i + 1))).unwrap();

    assert_eq!(pages, vec!["page 1", "page 2", "page 3"]);
}

#[test]
fn given_unreadable_page_when_collecting_pdf_pages_then_fails_naming_the_page() {
    let mut attempted = Vec::new();

    let result = PdfAdapter::collect_pages(4, |i| {
        attempted.push(i);
        if i == 1 {
            Err("broken content stream")
        } else {
            Ok(format!("page {}", i + 1))
        }
    });

    match result {
        Err(FileLoaderError::ExtractionFailed(detail)) => {
            assert_eq!(detail, "failed to extract page 2: broken content stream");
        }
        other => panic!("expected extraction failure, got {other:?}"),
    }
    assert_eq!(attempted, vec![0, 1]);
}

#[test]
fn given_every_page_unreadable_when_collecting_pdf_pages_then_fails_instead_of_returning_blank_text() {
    let result = PdfAdapter::collect_pages(2, |_| Err::<String, _>("no text layer"));

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}
