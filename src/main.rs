//! tabsniff CLI: sniff the dialect of delimited text files.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tabsniff::{Metadata, Quote, SampleSize, Sniffer};

/// Infer the dialect of delimited text files: delimiter, quoting, line
/// endings, header and preamble layout.
#[derive(Parser, Debug)]
#[command(name = "tabsniff")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input file(s) to sniff
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Number of records to sample
    #[arg(short = 'n', long, default_value = "100", conflicts_with_all = ["sample_bytes", "all"])]
    sample_records: usize,

    /// Number of bytes to sample
    #[arg(short = 'b', long)]
    sample_bytes: Option<usize>,

    /// Read entire files instead of sampling
    #[arg(short = 'a', long)]
    all: bool,

    /// Force a specific delimiter (single character, or 'tab')
    #[arg(short = 'd', long)]
    delimiter: Option<String>,

    /// Force a specific quote character (single character, or 'none')
    #[arg(short = 'q', long)]
    quote: Option<String>,

    /// Emit JSON instead of text
    #[arg(short = 'j', long)]
    json: bool,

    /// List detected field names
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let sniffer = match build_sniffer(&args) {
        Ok(sniffer) => sniffer,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let mut exit_code = ExitCode::SUCCESS;
    for file in &args.files {
        match sniffer.sniff_path(file) {
            Ok(metadata) if args.json => print_json(file, &metadata, args.verbose),
            Ok(metadata) => print_text(file, &metadata, args.verbose),
            Err(e) => {
                eprintln!("{}: {e}", file.display());
                exit_code = ExitCode::FAILURE;
            }
        }
    }
    exit_code
}

fn build_sniffer(args: &Args) -> Result<Sniffer, String> {
    let sample_size = if args.all {
        SampleSize::All
    } else if let Some(bytes) = args.sample_bytes {
        SampleSize::Bytes(bytes)
    } else {
        SampleSize::Records(args.sample_records)
    };

    let mut sniffer = Sniffer::new().with_sample_size(sample_size);

    if let Some(spec) = &args.delimiter {
        let delimiter = match spec.as_str() {
            "tab" | "\\t" => b'\t',
            s if s.len() == 1 && s.is_ascii() => s.as_bytes()[0],
            other => return Err(format!("invalid delimiter: {other:?}")),
        };
        sniffer = sniffer.with_delimiter(delimiter);
    }

    if let Some(spec) = &args.quote {
        let quote = match spec.as_str() {
            "none" => Quote::None,
            s if s.len() == 1 && s.is_ascii() => Quote::Some(s.as_bytes()[0]),
            other => return Err(format!("invalid quote: {other:?}")),
        };
        sniffer = sniffer.with_quote(quote);
    }

    Ok(sniffer)
}

fn print_text(path: &PathBuf, metadata: &Metadata, verbose: bool) {
    let dialect = &metadata.dialect;
    println!("{}", path.display());
    println!("  delimiter:      {:?}", dialect.delimiter as char);
    println!("  quote:          {}", dialect.quote);
    println!("  terminator:     {}", dialect.line_terminator);
    println!("  has header:     {}", dialect.header.has_header_row);
    println!("  preamble rows:  {}", dialect.header.num_preamble_rows);
    println!("  flexible:       {}", dialect.flexible);
    println!("  fields:         {}", metadata.num_fields);
    println!("  avg record len: {} bytes", metadata.avg_record_len);
    if verbose {
        for (i, name) in metadata.fields.iter().enumerate() {
            println!("    {}: {name}", i + 1);
        }
    }
    println!();
}

fn print_json(path: &PathBuf, metadata: &Metadata, verbose: bool) {
    let dialect = &metadata.dialect;
    let quote = match dialect.quote {
        Quote::None => "null".to_string(),
        Quote::Some(q) => format!("{:?}", (q as char).to_string()),
    };
    print!(
        r#"{{"file":{:?},"dialect":{{"delimiter":{:?},"quote":{},"line_terminator":{:?},"has_header":{},"preamble_rows":{},"flexible":{}}},"num_fields":{},"avg_record_len":{}"#,
        path.display().to_string(),
        (dialect.delimiter as char).to_string(),
        quote,
        dialect.line_terminator.as_str(),
        dialect.header.has_header_row,
        dialect.header.num_preamble_rows,
        dialect.flexible,
        metadata.num_fields,
        metadata.avg_record_len,
    );
    if verbose {
        print!(r#","fields":["#);
        for (i, name) in metadata.fields.iter().enumerate() {
            if i > 0 {
                print!(",");
            }
            print!("{name:?}");
        }
        print!("]");
    }
    println!("}}");
}
