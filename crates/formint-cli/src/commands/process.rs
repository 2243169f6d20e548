//! Process command - extract fields from a single form file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use formint_core::models::config::FormintConfig;
use formint_core::models::field::{FormExtract, SourceType};
use formint_core::form::{ExtractionResult, FormParser};
use formint_core::pdf::{PdfExtractor, PdfProcessor, PdfType};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or already-converted plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print the extraction trace to stderr
    #[arg(long)]
    show_trace: bool,

    /// Validate structural invariants of the extracted fields
    #[arg(long)]
    validate: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output (one row per field)
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        FormintConfig::from_file(std::path::Path::new(path))?
    } else {
        FormintConfig::default()
    };

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let extension = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let result = match extension.as_str() {
        "pdf" => process_pdf(&args, &config, &pb)?,
        "txt" | "text" => process_text(&args, &config, &pb)?,
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    };

    pb.finish_with_message("Done");

    if args.show_trace {
        for entry in &result.trace {
            eprintln!("{} {}", style("trace:").dim(), entry);
        }
    }

    // Validate if requested
    if args.validate {
        let issues = result.form.validate();
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    // Format output
    let output = format_extract(&result.form, args.format)?;

    // Write output
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn process_pdf(
    args: &ProcessArgs,
    config: &FormintConfig,
    pb: &ProgressBar,
) -> anyhow::Result<ExtractionResult> {
    pb.set_message("Loading PDF...");
    pb.set_position(10);

    let data = fs::read(&args.input)?;
    let mut extractor = PdfExtractor::new().with_min_text_length(config.pdf.min_text_length);
    extractor.load(&data)?;

    debug!("PDF has {} pages", extractor.page_count());

    pb.set_message("Analyzing PDF...");
    pb.set_position(30);

    if extractor.analyze() == PdfType::Scanned {
        anyhow::bail!(
            "PDF appears to be scanned (no embedded text). \
             Run it through a conversion/OCR engine first and process the text output."
        );
    }

    pb.set_message("Extracting text...");
    pb.set_position(50);

    let text = extractor.extract_text()?;

    pb.set_message("Extracting form fields...");
    pb.set_position(80);

    let mut result = parse_text(&text, args, config);
    result.form.metadata.source_type = SourceType::TextPdf;

    pb.set_position(100);
    Ok(result)
}

fn process_text(
    args: &ProcessArgs,
    config: &FormintConfig,
    pb: &ProgressBar,
) -> anyhow::Result<ExtractionResult> {
    pb.set_message("Reading text...");
    pb.set_position(30);

    let text = fs::read_to_string(&args.input)?;

    pb.set_message("Extracting form fields...");
    pb.set_position(80);

    let mut result = parse_text(&text, args, config);
    result.form.metadata.source_type = SourceType::PlainText;

    pb.set_position(100);
    Ok(result)
}

fn parse_text(text: &str, args: &ProcessArgs, config: &FormintConfig) -> ExtractionResult {
    let parser =
        FormParser::new().with_trace(config.extraction.capture_trace || args.show_trace);
    parser.parse(text)
}

pub fn format_extract(extract: &FormExtract, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(extract)?),
        OutputFormat::Csv => format_csv(extract),
        OutputFormat::Text => Ok(format_text(extract)),
    }
}

pub fn format_csv(extract: &FormExtract) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    // Write header
    wtr.write_record([
        "item_number",
        "label",
        "field_type",
        "is_parent",
        "is_subfield",
        "parent_number",
    ])?;

    // One row per field; absent parent_number renders as empty string
    for field in &extract.fields {
        let field_type = field.field_type.to_string();
        let is_parent = field.is_parent.to_string();
        let is_subfield = field.is_subfield.to_string();

        wtr.write_record([
            field.item_number.as_str(),
            field.label.as_str(),
            field_type.as_str(),
            is_parent.as_str(),
            is_subfield.as_str(),
            field.parent_number.as_deref().unwrap_or(""),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn format_text(extract: &FormExtract) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Form: {} ({})\n",
        extract.form_type,
        extract.form_type.title()
    ));
    output.push_str(&format!(
        "Fields: {} ({} parents, {} subfields)\n\n",
        extract.fields.len(),
        extract.parent_count(),
        extract.subfield_count()
    ));

    for field in &extract.fields {
        if field.is_subfield {
            output.push_str(&format!(
                "    {}. {} [{}]\n",
                field.item_number, field.label, field.field_type
            ));
        } else {
            output.push_str(&format!(
                "{}. {} [{}]\n",
                field.item_number, field.label, field.field_type
            ));
        }
    }

    if !extract.metadata.warnings.is_empty() {
        output.push('\n');
        for warning in &extract.metadata.warnings {
            output.push_str(&format!("Warning: {}\n", warning));
        }
    }

    output
}
