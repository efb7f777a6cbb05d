//! Command-line tool for checking and transcoding OpenStep property lists.
//!
//! Usage: openstep [OPTIONS] [FILE|DIR]
//!
//! Options:
//!   -t, --to <FORMAT>      Output format (json, annotated, yaml, toml, cbor, diag)
//!   -w, --write            Write output to file with inferred name
//!   -o, --output <FILE>    Write output to specified file
//!   --check                Check if input is valid (exit 0 if valid, 1 if invalid)
//!   -h, --help             Print help
//!   -V, --version          Print version

use libopenstep::{encode, parse_with_filename, Format, Value};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process;

mod transcode;

/// Output formats understood by `-t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Json,
    AnnotatedJson,
    Yaml,
    Toml,
    Cbor,
    CborDiag,
}

/// Extensions picked up when a directory is given as input.
const INPUT_EXTENSIONS: &[&str] = &["plist", "strings", "pbxproj"];

fn parse_output(s: &str) -> Option<Output> {
    match s {
        "json" => Some(Output::Json),
        "annotated" => Some(Output::AnnotatedJson),
        "yaml" | "yml" => Some(Output::Yaml),
        "toml" => Some(Output::Toml),
        "cbor" => Some(Output::Cbor),
        "diag" => Some(Output::CborDiag),
        _ => None,
    }
}

fn output_extension(output: Output) -> &'static str {
    match output {
        Output::Json => "json",
        Output::AnnotatedJson => "annotated.json",
        Output::Yaml => "yaml",
        Output::Toml => "toml",
        Output::Cbor => "cbor",
        Output::CborDiag => "diag",
    }
}

/// Options collected from the command line.
struct Options<'a> {
    output: Output,
    write_back: bool,
    output_file: Option<&'a str>,
    check_only: bool,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut output: Option<Output> = None;
    let mut write_back = false;
    let mut output_file: Option<&str> = None;
    let mut check_only = false;
    let mut input_path: Option<&str> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-V" | "--version" => {
                println!("openstep {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            "-t" | "--to" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: -t requires a format argument");
                    process::exit(1);
                }
                match parse_output(&args[i]) {
                    Some(format) => output = Some(format),
                    None => {
                        eprintln!("Error: Unknown format: {}", args[i]);
                        process::exit(1);
                    }
                }
            }
            "-w" | "--write" => {
                write_back = true;
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --output requires an argument");
                    process::exit(1);
                }
                output_file = Some(&args[i]);
            }
            "--check" => {
                check_only = true;
            }
            "-" => {
                // Explicit stdin
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                process::exit(1);
            }
            _ => {
                if input_path.is_some() {
                    eprintln!("Error: Multiple input paths not supported");
                    process::exit(1);
                }
                input_path = Some(&args[i]);
            }
        }
        i += 1;
    }

    if write_back && output_file.is_some() {
        eprintln!("Error: --write and --output are mutually exclusive");
        process::exit(1);
    }

    let options = Options {
        output: output.unwrap_or(Output::Json),
        write_back,
        output_file,
        check_only,
    };

    if let Some(path) = input_path {
        if Path::new(path).is_dir() {
            if options.output_file.is_some() {
                eprintln!("Error: --output cannot be used with directory input");
                process::exit(1);
            }
            process::exit(process_directory(path, &options));
        }
    }

    let input = match input_path {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading {}: {}", path, e);
                process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading stdin: {}", e);
                process::exit(1);
            }
            buffer
        }
    };

    process::exit(process_input(&input, input_path, &options));
}

fn process_directory(dir_path: &str, options: &Options) -> i32 {
    let entries = match fs::read_dir(dir_path) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error reading directory {}: {}", dir_path, e);
            return 1;
        }
    };

    let mut paths: Vec<_> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|e| INPUT_EXTENSIONS.iter().any(|ext| e == *ext))
                .unwrap_or(false)
        })
        .collect();
    paths.sort();

    let mut had_errors = false;
    for path in paths {
        let path_str = path.to_string_lossy();
        let input = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading {}: {}", path_str, e);
                had_errors = true;
                continue;
            }
        };

        if process_input(&input, Some(&*path_str), options) != 0 {
            had_errors = true;
        }
    }

    if had_errors {
        1
    } else {
        0
    }
}

fn process_input(input: &str, input_file: Option<&str>, options: &Options) -> i32 {
    let filename = input_file.map(|p| {
        Path::new(p)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| p.to_string())
    });

    let value = match parse_with_filename(input, filename.as_deref()) {
        Ok(v) => v,
        Err(e) => {
            if let Some(path) = input_file {
                eprintln!("{}: {}", path, e);
            } else {
                eprintln!("Parse error: {}", e);
            }
            return 1;
        }
    };

    if options.check_only {
        match input_file {
            Some(path) => println!("{}: ok", path),
            None => println!("ok"),
        }
        return 0;
    }

    match render(&value, options.output) {
        Ok(bytes) => write_output(&bytes, input_file, options),
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

/// Encode a decoded document in the requested output format.
fn render(value: &Value, output: Output) -> Result<Vec<u8>, String> {
    match output {
        Output::Json => Ok(with_newline(encode(value, Format::Json))),
        Output::AnnotatedJson => Ok(with_newline(encode(value, Format::AnnotatedJson))),
        Output::Yaml => transcode::yaml::encode(value)
            .map(String::into_bytes)
            .map_err(|e| format!("Cannot convert to YAML: {}", e)),
        Output::Toml => transcode::toml::encode(value)
            .map(String::into_bytes)
            .map_err(|e| format!("Cannot convert to TOML: {}", e)),
        Output::Cbor => {
            transcode::cbor::encode(value).map_err(|e| format!("Cannot convert to CBOR: {}", e))
        }
        Output::CborDiag => {
            // Encode to CBOR bytes first so the notation reflects the wire encoding.
            let bytes = transcode::cbor::encode(value)
                .map_err(|e| format!("Cannot convert to CBOR: {}", e))?;
            transcode::cbor::diagnostic(&bytes)
                .map(String::into_bytes)
                .map_err(|e| format!("Cannot render CBOR diagnostic notation: {}", e))
        }
    }
}

fn with_newline(mut text: String) -> Vec<u8> {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text.into_bytes()
}

fn write_output(output: &[u8], input_file: Option<&str>, options: &Options) -> i32 {
    if let Some(path) = options.output_file {
        if let Err(e) = fs::write(path, output) {
            eprintln!("Error writing {}: {}", path, e);
            return 1;
        }
    } else if options.write_back {
        let Some(input_path) = input_file else {
            eprintln!("Error: --write requires an input file");
            return 1;
        };
        let output_path = Path::new(input_path).with_extension(output_extension(options.output));
        if let Err(e) = fs::write(&output_path, output) {
            eprintln!("Error writing {}: {}", output_path.display(), e);
            return 1;
        }
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        if let Err(e) = handle.write_all(output) {
            eprintln!("Error writing to stdout: {}", e);
            return 1;
        }
    }
    0
}

fn print_help() {
    println!(
        "openstep - OpenStep property-list tool

USAGE:
    openstep [OPTIONS] [FILE|DIR]

ARGS:
    [FILE|DIR]    Input file or directory (reads from stdin if not provided)
                  When a directory is given, processes all .plist, .strings
                  and .pbxproj files in it

OPTIONS:
    -t, --to <FORMAT>      Output format [default: json]
                           Supported: json, annotated, yaml, toml, cbor, diag

                           'annotated' is JSON that keeps, for every literal,
                           whether it was quoted and the comment after it.

    -w, --write            Write output to file with inferred extension

    -o, --output <FILE>    Write output to specified file (not valid with directory input)

    --check                Check if input is valid (exit 0 if valid, 1 if invalid)

    -h, --help             Print help

    -V, --version          Print version

EXAMPLES:
    # Print an Xcode project as JSON
    openstep project.pbxproj

    # Validate every property list in a directory
    openstep --check ./Resources/

    # Keep quoting and comments
    openstep -t annotated Info.plist

    # Convert to YAML or TOML
    openstep -t yaml Info.plist
    openstep -t toml Info.plist -o Info.toml

    # Convert to CBOR, or view it in diagnostic notation (RFC 8949 §8)
    openstep -t cbor Info.plist -o Info.cbor
    openstep -t diag Info.plist
"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output() {
        assert_eq!(parse_output("json"), Some(Output::Json));
        assert_eq!(parse_output("yml"), Some(Output::Yaml));
        assert_eq!(parse_output("diag"), Some(Output::CborDiag));
        assert_eq!(parse_output("xml"), None);
    }

    #[test]
    fn test_render_json_ends_with_newline() {
        let value = libopenstep::parse("{a=b;}").unwrap();
        let bytes = render(&value, Output::Json).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "{\n  \"a\": \"b\"\n}\n");
    }

    #[test]
    fn test_render_all_formats() {
        let value = libopenstep::parse("{ a = ( b, { c = d; }, ); }").unwrap();
        for output in [
            Output::Json,
            Output::AnnotatedJson,
            Output::Yaml,
            Output::Toml,
            Output::Cbor,
            Output::CborDiag,
        ] {
            assert!(render(&value, output).is_ok(), "{:?}", output);
        }
    }

    #[test]
    fn test_output_extension() {
        assert_eq!(
            Path::new("Info.plist").with_extension(output_extension(Output::AnnotatedJson)),
            Path::new("Info.annotated.json")
        );
    }
}
