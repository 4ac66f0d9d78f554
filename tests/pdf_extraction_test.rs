use anyhow::Result;
use ecce_calendar::core::TextSource;
use ecce_calendar::{
    CalendarPipeline, CliConfig, EtlEngine, Extractor, LayoutConfig, LocalStorage, PdfTextSource,
};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use tempfile::TempDir;

/// Builds a PDF with one text line per `Tj`, one page per slice.
fn calendar_pdf(pages: &[&[&str]]) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("TL", vec![18.into()]),
            Operation::new("Td", vec![50.into(), 760.into()]),
        ];
        for line in lines.iter() {
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

const COVER: &[&str] = &["Little Acorns Preschool", "ECCE Service Calendar 2025/2026"];

const CLOSURES: &[&str] = &[
    "We will be closed on the following dates:",
    "25/08/2025 - 29/08/2025",
    "02/02/2026",
    "16/02/2026 - 17/02/2026",
    "This calendar has been registered",
];

#[test]
fn test_pdf_text_source_keeps_pages_and_lines() -> Result<()> {
    let pdf = calendar_pdf(&[COVER, CLOSURES])?;

    let pages = PdfTextSource.page_texts(&pdf)?;
    assert_eq!(pages.len(), 2);
    assert!(pages[1].contains("We will be closed on the following dates:"));

    let extractor = Extractor::new(&LayoutConfig::default())?;
    let closures = extractor.extract_from_bytes(&PdfTextSource, &pdf)?;

    let found: Vec<(usize, &str, Option<&str>)> = closures
        .iter()
        .map(|c| (c.page, c.start_text.as_str(), c.end_text.as_deref()))
        .collect();
    assert_eq!(
        found,
        vec![
            (2, "25/08/2025", Some("29/08/2025")),
            (2, "02/02/2026", None),
            (2, "16/02/2026", Some("17/02/2026")),
        ]
    );

    Ok(())
}

#[test]
fn test_pdf_without_closure_section_is_extraction_error() -> Result<()> {
    let pdf = calendar_pdf(&[COVER])?;

    let extractor = Extractor::new(&LayoutConfig::default())?;
    let result = extractor.extract_from_bytes(&PdfTextSource, &pdf);

    assert!(matches!(
        result,
        Err(ecce_calendar::EtlError::ExtractionError { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_pdf_file_to_csv() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("calendar.pdf");
    let output = temp_dir.path().join("calendar.csv");
    std::fs::write(&input, calendar_pdf(&[COVER, CLOSURES])?)?;

    let config = CliConfig::new(input.to_str().unwrap(), output.to_str().unwrap());
    let pipeline = CalendarPipeline::new(LocalStorage::new("."), config);
    EtlEngine::new(pipeline).run().await?;

    let csv = std::fs::read_to_string(&output)?;
    assert_eq!(
        csv,
        "Holiday Name,Start Date,End Date,Funding Received to\n\
         Closed,2025-08-25,2025-08-29,None\n\
         Closed,2026-02-16,2026-02-17,Only Service\n"
    );

    Ok(())
}
