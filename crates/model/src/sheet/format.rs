use crate::execution::errors::JobSpecError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Output file type a sheet can be exported as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SheetFormat {
    Csv,
    Excel,
    Pdf,
}

impl SheetFormat {
    /// File extension used for the planned output path.
    ///
    /// This is the lower-cased format name, so Excel exports land at
    /// `{sheet_id}.excel`.
    pub fn extension(&self) -> &'static str {
        match self {
            SheetFormat::Csv => "csv",
            SheetFormat::Excel => "excel",
            SheetFormat::Pdf => "pdf",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SheetFormat::Csv => "CSV",
            SheetFormat::Excel => "EXCEL",
            SheetFormat::Pdf => "PDF",
        }
    }
}

impl fmt::Display for SheetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SheetFormat {
    type Err = JobSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CSV" => Ok(SheetFormat::Csv),
            "EXCEL" => Ok(SheetFormat::Excel),
            "PDF" => Ok(SheetFormat::Pdf),
            other => Err(JobSpecError::UnknownFormat(other.to_string())),
        }
    }
}

/// Paper size for PDF exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaperSize {
    Letter,
    Legal,
    Wide,
    ArchD,
    A4,
    A3,
    A2,
    A1,
    A0,
}

impl PaperSize {
    /// Name the remote service expects in the `paperSize` parameter.
    pub fn name(&self) -> &'static str {
        match self {
            PaperSize::Letter => "LETTER",
            PaperSize::Legal => "LEGAL",
            PaperSize::Wide => "WIDE",
            PaperSize::ArchD => "ARCHD",
            PaperSize::A4 => "A4",
            PaperSize::A3 => "A3",
            PaperSize::A2 => "A2",
            PaperSize::A1 => "A1",
            PaperSize::A0 => "A0",
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaperSize {
    type Err = JobSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LETTER" => Ok(PaperSize::Letter),
            "LEGAL" => Ok(PaperSize::Legal),
            "WIDE" => Ok(PaperSize::Wide),
            "ARCHD" => Ok(PaperSize::ArchD),
            "A4" => Ok(PaperSize::A4),
            "A3" => Ok(PaperSize::A3),
            "A2" => Ok(PaperSize::A2),
            "A1" => Ok(PaperSize::A1),
            "A0" => Ok(PaperSize::A0),
            other => Err(JobSpecError::UnknownPaperSize(other.to_string())),
        }
    }
}

/// A validated export request: the format together with whatever that
/// format needs. Only PDF carries a paper size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Csv,
    Excel,
    Pdf(PaperSize),
}

impl ExportFormat {
    pub fn new(format: SheetFormat, paper_size: Option<PaperSize>) -> Result<Self, JobSpecError> {
        match (format, paper_size) {
            (SheetFormat::Csv, None) => Ok(ExportFormat::Csv),
            (SheetFormat::Excel, None) => Ok(ExportFormat::Excel),
            (SheetFormat::Pdf, Some(size)) => Ok(ExportFormat::Pdf(size)),
            (SheetFormat::Pdf, None) => Err(JobSpecError::ConfigurationMissing(
                "PDF sheet type needs a paper size; paper size is unspecified".to_string(),
            )),
            (format, Some(size)) => Err(JobSpecError::UnexpectedPaperSize { format, size }),
        }
    }

    pub fn format(&self) -> SheetFormat {
        match self {
            ExportFormat::Csv => SheetFormat::Csv,
            ExportFormat::Excel => SheetFormat::Excel,
            ExportFormat::Pdf(_) => SheetFormat::Pdf,
        }
    }

    pub fn paper_size(&self) -> Option<PaperSize> {
        match self {
            ExportFormat::Pdf(size) => Some(*size),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        self.format().extension()
    }
}
