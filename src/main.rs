use bodyfmt::{
    BodyFormat, ContentType, XmlError, XmlResult, format_xml, json::try_prettify_json, prettify,
    prettify_xml_at,
};
use clap::Parser;
use std::{
    io::{Read, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Pretty-print a logged XML or JSON body.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file path; reads stdin when absent or `-`
    file: Option<PathBuf>,

    /// Body format (auto/json/xml/plain)
    #[arg(short, long, default_value = "auto")]
    format: String,

    /// Content-Type the body was logged with; picks the format when --format is auto,
    /// and the charset used to decode the input
    #[arg(short, long)]
    content_type: Option<String>,

    /// Indentation depth to start XML output at
    #[arg(short = 'd', long, default_value_t = 0)]
    indent_depth: usize,

    /// Print the body unchanged
    #[arg(long)]
    original: bool,

    /// Report parse errors instead of printing the fallback marker
    #[arg(long)]
    strict: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let args = Args::parse();
    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();

    if let Err(e) = run(&args, &mut stdin, &mut stdout) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(
    args: &Args,
    input: &mut dyn Read,
    output: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = read_body(args.file.as_deref(), input)?;
    let content_type = ContentType::parse(args.content_type.as_deref().unwrap_or_default());
    let body = content_type.decode(&bytes);

    if args.original {
        return emit(output, &body);
    }

    let format = match args.format.as_str() {
        "auto" => BodyFormat::detect(args.content_type.as_deref(), &body),
        other => other.parse::<BodyFormat>()?,
    };
    debug!(%format, encoding = content_type.encoding().name(), "formatting body");

    let output_text = match (format, args.strict) {
        (BodyFormat::Xml, true) => {
            format_xml(&body, args.indent_depth).map_err(|e| match &args.file {
                Some(path) => e.with_path(path.clone()),
                None => e,
            })?
        }
        (BodyFormat::Json, true) => try_prettify_json(&body)?,
        (BodyFormat::Xml, false) => prettify_xml_at(&body, args.indent_depth),
        _ => prettify(&body, format),
    };

    emit(output, &output_text)
}

fn read_body(path: Option<&Path>, input: &mut dyn Read) -> XmlResult<Vec<u8>> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            std::fs::read(path).map_err(|e| XmlError::from(e).with_path(path.to_path_buf()))
        }
        _ => {
            let mut body = Vec::new();
            input.read_to_end(&mut body)?;
            Ok(body)
        }
    }
}

fn emit(output: &mut dyn Write, text: &str) -> Result<(), Box<dyn std::error::Error>> {
    writeln!(output, "{text}")?;
    Ok(())
}
