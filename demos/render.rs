//! Render a marked-up worksheet text file to a PDF.
//!
//! ```text
//! cargo run --example render -- worksheet.txt worksheet.pdf [options.json]
//! ```

use worksheet_pdf::{LayoutOptions, Paginator};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(input), Some(output)) = (args.next(), args.next()) else {
        eprintln!("usage: render <input.txt> <output.pdf> [options.json]");
        std::process::exit(2);
    };

    let options = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path).expect("can read options");
            serde_json::from_str::<LayoutOptions>(&json).expect("options are valid JSON")
        }
        None => LayoutOptions::default(),
    };

    let text = std::fs::read_to_string(&input).expect("can read input");
    let document = Paginator::new(options)
        .layout(&text)
        .expect("can lay out worksheet");
    log::info!("{} pages", document.page_count());

    let out = std::fs::File::create(&output).expect("can create output");
    document.write(out).expect("can write pdf");
}
