use std::io;

use clap::{CommandFactory, Parser};
use itertools::Itertools;
use ratatui::style::Color;
use serde::Serialize;

use crate::{
    app,
    constants::COLORS,
    domain::{CategoryType, parse_color, parse_counts},
    pie::TaskPie,
};

#[derive(Parser, Debug)]
#[command(name = "taskpie")]
#[command(about = "Task progress as a pie chart", long_about = None)]
pub enum Cli {
    #[command(about = "Run the animated demo board")]
    Demo,

    #[command(about = "Plan pie slices for a set of counts")]
    Plan {
        #[arg(help = "Comma-separated counts, blanks keep a slot unknown")]
        counts: String,

        #[arg(long, help = "Comma-separated category names")]
        names: Option<String>,

        #[arg(long, help = "Comma-separated colors (hex or named)")]
        colors: Option<String>,

        #[arg(long, help = "Comma-separated category types")]
        kinds: Option<String>,

        #[arg(long, help = "Print the plan as JSON")]
        json: bool,
    },

    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(help = "Shell type (bash, zsh, fish)")]
        shell: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanExport {
    pub schema_version: u32,
    pub total_count: Option<f64>,
    pub total_completed: Option<f64>,
    pub total_left: Option<f64>,
    pub categories: Vec<CategoryExport>,
    pub slices: Vec<SliceExport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryExport {
    pub name: String,
    pub color: String,
    pub kind: Option<&'static str>,
    pub count: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SliceExport {
    pub start_angle: f64,
    pub sweep_angle: f64,
    pub color: String,
}

fn split_list(value: Option<String>) -> Vec<String> {
    value
        .map(|v| v.split(',').map(|token| token.trim().to_string()).collect())
        .unwrap_or_default()
}

fn build_pie(
    counts: &str,
    names: Option<String>,
    colors: Option<String>,
    kinds: Option<String>,
) -> Result<TaskPie, String> {
    let values = parse_counts(counts).map_err(|e| e.to_string())?;
    let names = split_list(names);
    let colors = split_list(colors);
    let kinds = split_list(kinds);

    let mut pie = TaskPie::new();
    pie.edit(|p| -> Result<(), String> {
        for (index, value) in values.iter().enumerate() {
            let name = names
                .get(index)
                .filter(|n| !n.is_empty())
                .cloned()
                .unwrap_or_else(|| format!("category {}", index + 1));

            let color = match colors.get(index).filter(|c| !c.is_empty()) {
                Some(token) => parse_color(token)
                    .ok_or_else(|| format!("'{}' is not a valid color", token))?,
                None => COLORS[index % COLORS.len()],
            };

            let kind = match kinds.get(index).filter(|k| !k.is_empty()) {
                Some(token) => Some(
                    CategoryType::parse(token)
                        .ok_or_else(|| format!("'{}' is not a valid category type", token))?,
                ),
                None => None,
            };

            p.add_category(name, color, kind, *value);
        }
        Ok(())
    })?;

    Ok(pie)
}

fn color_label(color: Color) -> String {
    match color {
        Color::Rgb(r, g, b) => format!("#{r:02x}{g:02x}{b:02x}"),
        Color::Indexed(i) => format!("indexed({i})"),
        Color::Reset => "reset".to_string(),
        Color::Black => "black".to_string(),
        Color::Red => "red".to_string(),
        Color::Green => "green".to_string(),
        Color::Yellow => "yellow".to_string(),
        Color::Blue => "blue".to_string(),
        Color::Magenta => "magenta".to_string(),
        Color::Cyan => "cyan".to_string(),
        Color::Gray => "gray".to_string(),
        Color::DarkGray => "darkgray".to_string(),
        Color::LightRed => "lightred".to_string(),
        Color::LightGreen => "lightgreen".to_string(),
        Color::LightYellow => "lightyellow".to_string(),
        Color::LightBlue => "lightblue".to_string(),
        Color::LightMagenta => "lightmagenta".to_string(),
        Color::LightCyan => "lightcyan".to_string(),
        Color::White => "white".to_string(),
    }
}

fn display_count(value: Option<f64>) -> String {
    match value {
        None => "?".to_string(),
        Some(v) if v.fract() == 0.0 => format!("{}", v as i64),
        Some(v) => format!("{v}"),
    }
}

pub fn plan(
    counts: String,
    names: Option<String>,
    colors: Option<String>,
    kinds: Option<String>,
    json: bool,
) -> Result<(), String> {
    let pie = build_pie(&counts, names, colors, kinds)?;
    let slices = pie.plan_slices();

    if json {
        let export = PlanExport {
            schema_version: 1,
            total_count: pie.total_count(),
            total_completed: pie.total_completed(),
            total_left: pie.total_left(),
            categories: pie
                .iter()
                .map(|c| CategoryExport {
                    name: c.name.clone(),
                    color: color_label(c.color),
                    kind: c.kind.map(|k| k.label()),
                    count: c.count,
                })
                .collect(),
            slices: slices
                .iter()
                .map(|s| SliceExport {
                    start_angle: s.start_angle,
                    sweep_angle: s.sweep_angle,
                    color: color_label(s.color),
                })
                .collect(),
        };

        let json = serde_json::to_string_pretty(&export).map_err(|e| e.to_string())?;
        println!("{}", json);
        return Ok(());
    }

    println!(
        "{:20} {:12} {:>8} {:>8} {:>8}  {}",
        "category", "type", "count", "start", "sweep", "color"
    );
    println!("{}", "-".repeat(70));

    // Slices come out in category order, one per drawn category.
    let mut slice_iter = slices.iter();
    for category in pie.iter() {
        let drawn = matches!(category.count, Some(c) if c > 0.0);
        let slice = if drawn { slice_iter.next() } else { None };

        let (start, sweep) = slice
            .map(|s| (format!("{:.1}", s.start_angle), format!("{:.1}", s.sweep_angle)))
            .unwrap_or_else(|| ("-".to_string(), "-".to_string()));

        println!(
            "{:20} {:12} {:>8} {:>8} {:>8}  {}",
            category.name,
            category.kind.map(|k| k.label()).unwrap_or("-"),
            display_count(category.count),
            start,
            sweep,
            color_label(category.color),
        );
    }

    println!("{}", "-".repeat(70));
    println!(
        "counts: {}",
        pie.counts().iter().map(|c| display_count(*c)).join(", ")
    );
    println!(
        "total {} | done {} | left {}",
        display_count(pie.total_count()),
        display_count(pie.total_completed()),
        display_count(pie.total_left()),
    );

    Ok(())
}

pub fn print_completions(shell: &str) -> Result<(), String> {
    use clap_complete::Shell;
    match shell {
        "bash" => {
            clap_complete::generate(
                Shell::Bash,
                &mut Cli::command(),
                "taskpie",
                &mut io::stdout(),
            );
        }
        "zsh" => {
            clap_complete::generate(Shell::Zsh, &mut Cli::command(), "taskpie", &mut io::stdout());
        }
        "fish" => {
            clap_complete::generate(
                Shell::Fish,
                &mut Cli::command(),
                "taskpie",
                &mut io::stdout(),
            );
        }
        _ => {
            return Err(format!(
                "Unsupported shell: {}. Use bash, zsh, or fish.",
                shell
            ));
        }
    }
    Ok(())
}

pub fn run_cli() {
    let cli = Cli::parse();
    match cli {
        Cli::Demo => {
            if let Err(e) = app::run_ui() {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Cli::Plan {
            counts,
            names,
            colors,
            kinds,
            json,
        } => {
            if let Err(e) = plan(counts, names, colors, kinds, json) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Cli::Completions { shell } => {
            if let Err(e) = print_completions(&shell) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
