//! pagemd CLI - rebuild Markdown from PDF page layout

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;

use pagemd::{
    extract_document, open_source, write_markdown, ExtractOptions, JsonFormat, LayoutOptions,
    LineGrouping, PageSelection, RenderOptions,
};

#[derive(Parser)]
#[command(name = "pagemd")]
#[command(version)]
#[command(about = "Rebuild Markdown from the words and tables of each PDF page", long_about = None)]
struct Cli {
    /// Input PDF, or a JSON array of page primitives
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// Output file (stdout if not specified)
    #[arg(value_name = "DEST")]
    dest: Option<PathBuf>,

    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long)]
    pages: Option<String>,

    /// Decimal places of the vertical position used to group words into lines
    #[arg(
        long,
        env = "PAGEMD_LINE_PRECISION",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(0..=i64::from(LineGrouping::MAX_PRECISION))
    )]
    line_precision: u32,

    /// Do not detect tables; every word becomes free text
    #[arg(long)]
    no_tables: bool,

    /// Render pages on a single thread
    #[arg(long)]
    sequential: bool,

    /// Render pages that fail to extract as empty instead of aborting
    #[arg(long)]
    lenient: bool,

    /// Emit the extracted page primitives as JSON instead of Markdown
    #[arg(long)]
    dump_primitives: bool,

    /// Output compact JSON (with --dump-primitives)
    #[arg(long)]
    compact: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let page_selection = match cli.pages.as_deref() {
        Some(p) => PageSelection::parse(p)?,
        None => PageSelection::All,
    };

    let mut extract_options = ExtractOptions::new()
        .with_pages(page_selection)
        .with_table_detection(!cli.no_tables);
    if cli.lenient {
        extract_options = extract_options.lenient();
    }

    let source = open_source(&cli.source, &extract_options)?;
    let doc = extract_document(&source, &extract_options)?;

    let output = if cli.dump_primitives {
        let format = if cli.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        pagemd::render::to_json(&doc, format)?
    } else {
        let layout = LayoutOptions::new().with_line_precision(cli.line_precision);
        let render_options = RenderOptions::new().with_parallel(!cli.sequential);
        pagemd::render::to_markdown(&doc, &layout, &render_options)?
    };

    match cli.dest.as_deref() {
        Some(path) => save(path, &output)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn save(path: &Path, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    write_markdown(path, content)?;
    eprintln!("{} {}", "Saved to".green(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_source_is_required() {
        assert!(Cli::try_parse_from(["pagemd"]).is_err());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "pagemd",
            "in.pdf",
            "out.md",
            "--pages",
            "1-3",
            "--line-precision",
            "0",
            "--no-tables",
            "--lenient",
        ])
        .unwrap();
        assert_eq!(cli.source, PathBuf::from("in.pdf"));
        assert_eq!(cli.dest, Some(PathBuf::from("out.md")));
        assert_eq!(cli.pages.as_deref(), Some("1-3"));
        assert_eq!(cli.line_precision, 0);
        assert!(cli.no_tables && cli.lenient);
        assert!(!cli.sequential && !cli.dump_primitives);
    }

    #[test]
    fn test_line_precision_range() {
        let cli = Cli::try_parse_from(["pagemd", "in.pdf", "--line-precision", "6"]).unwrap();
        assert_eq!(cli.line_precision, 6);

        let err = Cli::try_parse_from(["pagemd", "in.pdf", "--line-precision", "7"]);
        assert!(err.is_err());
    }

    #[test]
    fn test_json_source_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("pages.json");
        let dest = dir.path().join("out.md");
        std::fs::write(
            &source,
            r#"[{"number": 1, "words": [{"text": "Hello", "x0": 0, "top": 0}]},
                {"number": 2, "words": [{"text": "End", "x0": 0, "top": 0}]}]"#,
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            std::ffi::OsStr::new("pagemd"),
            source.as_os_str(),
            dest.as_os_str(),
        ])
        .unwrap();
        run(&cli).unwrap();

        let markdown = std::fs::read_to_string(&dest).unwrap();
        assert_eq!(markdown, "Hello  \n  \n---  \nEnd  \n");
    }

    #[test]
    fn test_missing_source_fails() {
        let cli = Cli::try_parse_from(["pagemd", "/no/such/file.pdf"]).unwrap();
        let err = run(&cli).unwrap_err();
        assert!(err.to_string().contains("Source not found"));
    }
}
