use ratatui::style::Color;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PieError {
    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),

    #[error("category index {index} out of range (length {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CategoryType {
    NotStarted,
    InProgress,
    Completed,
    Skipped,
    Failed,
}

impl CategoryType {
    pub fn parse(value: &str) -> Option<Self> {
        let normalized: String = value
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect();

        match normalized.as_str() {
            "notstarted" => Some(CategoryType::NotStarted),
            "inprogress" => Some(CategoryType::InProgress),
            "completed" => Some(CategoryType::Completed),
            "skipped" => Some(CategoryType::Skipped),
            "failed" => Some(CategoryType::Failed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryType::NotStarted => "not-started",
            CategoryType::InProgress => "in-progress",
            CategoryType::Completed => "completed",
            CategoryType::Skipped => "skipped",
            CategoryType::Failed => "failed",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Category {
    pub name: String,
    pub color: Color,
    pub kind: Option<CategoryType>,
    pub count: Option<f64>,
}

impl Category {
    pub fn new(
        name: impl Into<String>,
        color: Color,
        kind: Option<CategoryType>,
        count: Option<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            color,
            kind,
            count: normalize_count(count),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slice {
    pub start_angle: f64,
    pub sweep_angle: f64,
    pub color: Color,
}

// A NaN count means "unknown", same as an absent one.
pub fn normalize_count(value: Option<f64>) -> Option<f64> {
    match value {
        Some(v) if v.is_nan() => None,
        other => other,
    }
}

pub fn total_count(categories: &[Category]) -> Option<f64> {
    let mut total = None;
    for category in categories {
        if let Some(count) = category.count {
            *total.get_or_insert(0.0) += count;
        }
    }
    total
}

pub fn total_of(categories: &[Category], kind: CategoryType) -> Option<f64> {
    let mut total = None;
    for category in categories {
        if let Some(count) = category.count {
            let running = total.get_or_insert(0.0);
            if category.kind == Some(kind) {
                *running += count;
            }
        }
    }
    total
}

pub fn total_completed(categories: &[Category]) -> Option<f64> {
    total_of(categories, CategoryType::Completed)
}

pub fn total_left(categories: &[Category]) -> Option<f64> {
    let mut total = None;
    for category in categories {
        if let Some(count) = category.count {
            let running = total.get_or_insert(0.0);
            if matches!(
                category.kind,
                Some(CategoryType::NotStarted | CategoryType::InProgress)
            ) {
                *running += count;
            }
        }
    }
    total
}

pub fn plan_slices(categories: &[Category]) -> Vec<Slice> {
    let Some(total) = total_count(categories) else {
        return Vec::new();
    };
    if total <= 0.0 {
        return Vec::new();
    }

    let last_index = categories.len() - 1;
    let mut slices = Vec::new();
    let mut start_angle = 0.0;

    for (i, category) in categories.iter().enumerate() {
        let count = match category.count {
            Some(count) if count > 0.0 => count,
            _ => continue,
        };

        // The literal last category absorbs the rounding remainder so the
        // circle closes. If it has no drawable count the remainder is
        // simply never drawn.
        let sweep_angle = if i < last_index {
            count / total * 360.0
        } else {
            360.0 - start_angle
        };

        slices.push(Slice {
            start_angle,
            sweep_angle,
            color: category.color,
        });
        start_angle += sweep_angle;
    }

    slices
}

pub fn parse_counts(text: &str) -> Result<Vec<Option<f64>>, PieError> {
    let mut values = Vec::new();

    for token in text.split(',') {
        let token = token.trim();
        if token.is_empty() {
            values.push(None);
            continue;
        }

        let value: f64 = token
            .parse()
            .map_err(|_| PieError::InvalidNumber(token.to_string()))?;
        values.push(Some(value));
    }

    Ok(values)
}

pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    // Bare hex without '#' is accepted too.
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }

    match value.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "white" => Some(Color::White),
        _ => None,
    }
}
