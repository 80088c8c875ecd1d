use phf::phf_map;
use serde::{Deserialize, Serialize};

/// Exam type enum covering the two national exam formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExamType {
    /// Temel Yeterlilik Testi
    #[serde(rename = "TYT")]
    Tyt,
    /// Alan Yeterlilik Testi
    #[serde(rename = "AYT")]
    Ayt,
}

/// Static per-subject configuration: how many questions the exam takes from
/// the pool, the nominal time block, and the score weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectSpec {
    pub question_count: usize,
    pub time_limit_min: u32,
    pub weight: f64,
}

/// TYT subjects in exam order.
pub const TYT_SUBJECTS: [&str; 4] = [
    "Türkçe",
    "Sosyal Bilimler Testi",
    "Temel Matematik Testi",
    "Fen Bilimleri Testi",
];

/// AYT subjects in exam order.
pub const AYT_SUBJECTS: [&str; 4] = [
    "Türk Dili ve Edebiyatı-Sosyal Bilimler I",
    "Matematik",
    "Fen Bilimleri",
    "Sosyal Bilimler II",
];

static TYT_SPECS: phf::Map<&'static str, SubjectSpec> = phf_map! {
    "Türkçe" => SubjectSpec { question_count: 40, time_limit_min: 40, weight: 1.32 },
    "Sosyal Bilimler Testi" => SubjectSpec { question_count: 20, time_limit_min: 20, weight: 1.36 },
    "Temel Matematik Testi" => SubjectSpec { question_count: 40, time_limit_min: 40, weight: 1.32 },
    "Fen Bilimleri Testi" => SubjectSpec { question_count: 20, time_limit_min: 20, weight: 1.36 },
};

static AYT_SPECS: phf::Map<&'static str, SubjectSpec> = phf_map! {
    "Türk Dili ve Edebiyatı-Sosyal Bilimler I" => SubjectSpec { question_count: 40, time_limit_min: 45, weight: 1.32 },
    "Matematik" => SubjectSpec { question_count: 40, time_limit_min: 45, weight: 1.32 },
    "Fen Bilimleri" => SubjectSpec { question_count: 40, time_limit_min: 45, weight: 1.36 },
    "Sosyal Bilimler II" => SubjectSpec { question_count: 40, time_limit_min: 45, weight: 1.36 },
};

impl ExamType {
    /// Canonical uppercase name, as used in URLs and storage.
    pub fn name(self) -> &'static str {
        match self {
            ExamType::Tyt => "TYT",
            ExamType::Ayt => "AYT",
        }
    }

    /// Total allotted time in seconds (TYT 165 min, AYT 180 min).
    pub fn total_time_secs(self) -> u64 {
        match self {
            ExamType::Tyt => 165 * 60,
            ExamType::Ayt => 180 * 60,
        }
    }

    /// Subjects in the fixed exam order.
    pub fn subjects(self) -> &'static [&'static str] {
        match self {
            ExamType::Tyt => &TYT_SUBJECTS,
            ExamType::Ayt => &AYT_SUBJECTS,
        }
    }

    /// Look up the static configuration for one of this exam's subjects.
    pub fn subject_spec(self, subject: &str) -> Option<&'static SubjectSpec> {
        match self {
            ExamType::Tyt => TYT_SPECS.get(subject),
            ExamType::Ayt => AYT_SPECS.get(subject),
        }
    }

    /// Parse an exam type from a path segment or stored value (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "TYT" => Some(ExamType::Tyt),
            "AYT" => Some(ExamType::Ayt),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// File-name slug for a subject: lowercase ASCII with underscores, Turkish
/// letters transliterated, e.g. "Matematik" -> "matematik",
/// "Türkçe" -> "turkce".
pub fn subject_slug(subject: &str) -> String {
    let mut slug = String::with_capacity(subject.len());
    for ch in subject.to_lowercase().chars() {
        match ch {
            'ç' => slug.push('c'),
            'ğ' => slug.push('g'),
            'ı' => slug.push('i'),
            'ö' => slug.push('o'),
            'ş' => slug.push('s'),
            'ü' => slug.push('u'),
            ' ' | '-' => slug.push('_'),
            c if c.is_ascii_alphanumeric() => slug.push(c),
            _ => {}
        }
    }
    slug
}
