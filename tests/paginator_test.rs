use pretty_assertions::assert_eq;
use worksheet_pdf::pipeline::{LopdfExtractor, TextExtractor};
use worksheet_pdf::{render_pdf, FontStyle, LayoutOptions, Paginator, Pt, StandardFont};

const WORKSHEET: &str = "*Plant Biology*\n\
**Photosynthesis**\n\
1. What gas do plants absorb? (How does rising CO2 change this?)\n\
2. Name the products of photosynthesis.\n\
\n\
Read more at https://climate.nasa.gov/ before class.\n\
https://climate.nasa.gov/evidence/";

#[test]
fn rendered_worksheets_read_back_in_order() {
    let pdf = render_pdf(WORKSHEET).expect("renders");
    assert!(pdf.starts_with(b"%PDF-"));

    let parsed = lopdf::Document::load_mem(&pdf).expect("parses");
    assert_eq!(parsed.get_pages().len(), 1);

    let text = LopdfExtractor.extract(&pdf).expect("extracts");
    let expected = [
        "Plant Biology",
        "Photosynthesis",
        "1.",
        "What gas do plants absorb?",
        "Name the products of photosynthesis.",
        "https://climate.nasa.gov/evidence/",
    ];
    let mut from = 0;
    for needle in expected {
        let at = text[from..]
            .find(needle)
            .unwrap_or_else(|| panic!("{needle:?} missing from {text:?}"));
        from += at + needle.len();
    }
    assert!(!text.contains('*'));
}

#[test]
fn page_count_survives_a_round_trip() {
    let text = (1..=120)
        .map(|i| format!("{i}. Question number {i}?"))
        .collect::<Vec<_>>()
        .join("\n");
    let paginator = Paginator::default();
    let pages = paginator.layout(&text).expect("lays out").page_count();
    assert!(pages >= 2);

    let pdf = paginator.render(&text).expect("renders");
    let parsed = lopdf::Document::load_mem(&pdf).expect("parses");
    assert_eq!(parsed.get_pages().len(), pages);
}

#[test]
fn every_span_stays_inside_the_margins() {
    let text = format!("**{}**\n{}", lipsum::lipsum(30), lipsum::lipsum(400));
    let options = LayoutOptions::default();
    let document = Paginator::new(options.clone()).layout(&text).expect("lays out");
    let family = worksheet_pdf::FontFamily::helvetica();

    for page in document.pages() {
        for span in &page.contents {
            let font = document.fonts.get(span.font.id).expect("font exists");
            let width = font
                .width_of_text(&span.text, span.font.size)
                .expect("measures");
            assert!(span.coords.0 >= options.margins.left);
            assert!(span.coords.0 + width <= options.page_size.0 - options.margins.right);
            assert!(span.coords.1 >= options.bottom());
            assert!(span.coords.1 <= options.top());
        }
    }

    // lipsum headers are bold
    let first = &document.pages().next().expect("a page").contents[0];
    let bold = document.fonts.get(first.font.id).expect("font exists");
    assert_eq!(bold.name(), family.get(FontStyle::Bold).name());
    assert_eq!(bold.name(), StandardFont::HelveticaBold.base_name());
}

#[test]
fn custom_sizes_and_spacing_are_honoured() {
    let options = LayoutOptions::default()
        .with_text_size(Pt(10.0))
        .with_line_height(Pt(12.0));
    let document = Paginator::new(options)
        .layout("one\n\ntwo")
        .expect("lays out");
    let page = document.pages().next().expect("a page");
    let placed: Vec<(&str, f32, f32)> = page
        .contents
        .iter()
        .map(|span| (span.text.as_str(), span.font.size.0, span.coords.1 .0))
        .collect();
    // body spacing 15, then a 12pt blank line
    assert_eq!(placed, vec![("one", 10.0, 752.0), ("two", 10.0, 725.0)]);
}
