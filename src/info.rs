use crate::refs::{ObjectReferences, RefType};
use chrono::{DateTime, Datelike, Local, Offset, Timelike};
use pdf_writer::{Date as PDate, Name, Pdf, TextStr};

/// Metadata written to the document information dictionary
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Info {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    /// Comma separated
    pub keywords: Option<String>,
}

impl Info {
    /// An empty block; only the creator and creation date get written
    pub fn new() -> Info {
        Info::default()
    }

    /// The metadata attached to every enhanced worksheet
    pub fn enhanced_worksheet() -> Info {
        Info::new()
            .with_title("Enhanced Worksheet")
            .with_subject("Worksheet annotated with climate change connections")
            .with_keywords("worksheet, climate change, education")
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let mut dict = writer.document_info(refs.gen(RefType::Info));

        let entries: [(&[u8], &Option<String>); 4] = [
            (b"Title", &self.title),
            (b"Author", &self.author),
            (b"Subject", &self.subject),
            (b"Keywords", &self.keywords),
        ];
        for (key, value) in entries {
            if let Some(value) = value {
                dict.pair(Name(key), TextStr(value));
            }
        }

        dict.creator(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " v",
            env!("CARGO_PKG_VERSION")
        )));
        dict.creation_date(pdf_date(Local::now()));
    }
}

fn pdf_date(now: DateTime<Local>) -> PDate {
    let offset_seconds = now.offset().fix().local_minus_utc();
    let offset_hours = offset_seconds / (60 * 60);
    let offset_minutes = ((offset_seconds % (60 * 60)) / 60).abs();
    PDate::new(now.year() as u16)
        .month(now.month() as u8)
        .day(now.day() as u8)
        .hour(now.hour() as u8)
        .minute(now.minute() as u8)
        .second(now.second() as u8)
        .utc_offset_hour(offset_hours as i8)
        .utc_offset_minute(offset_minutes as u8)
}
