use std::fmt::Debug;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use canonical_huffman::code::code_string;
use canonical_huffman::{
    Archive, CodeTable, FrequencyTable, HuffmanTree, SizeReport, Symbol, SymbolKind, WireSymbol,
};

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum SymbolMode {
    /// Code raw bytes
    Bytes,
    /// Decode the input as UTF-8 and code Unicode scalar values
    Chars,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print symbol frequencies, codes and the size comparison
    Analyze {
        /// File to analyze
        input: PathBuf,
        /// Unit of coding
        #[arg(short, long, value_enum, default_value_t = SymbolMode::Bytes)]
        symbols: SymbolMode,
        /// Also write the tree in Graphviz DOT format to this file
        #[arg(long)]
        dot: Option<PathBuf>,
    },
    /// Compress INPUT into a container written to OUTPUT
    #[command(visible_alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,
        /// Container to create
        output: PathBuf,
        /// Unit of coding
        #[arg(short, long, value_enum, default_value_t = SymbolMode::Bytes)]
        symbols: SymbolMode,
    },
    /// Restore the data held by the container INPUT into OUTPUT
    #[command(visible_alias = "d")]
    Decompress {
        /// Container to read
        input: PathBuf,
        /// File to create
        output: PathBuf,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None, infer_subcommands = true)]
/// Huffman coding tool.
pub struct Conf {
    #[command(subcommand)]
    pub command: Command,
}

fn main() -> anyhow::Result<()> {
    let conf = Conf::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match conf.command {
        Command::Analyze {
            input,
            symbols,
            dot,
        } => {
            let bytes = read_file(&input)?;
            let original_bits = bytes.len() as u64 * 8;
            match symbols {
                SymbolMode::Bytes => {
                    analyze(&bytes, original_bits, dot.as_deref(), byte_label, &mut out)
                }
                SymbolMode::Chars => {
                    let text = to_chars(&bytes, &input)?;
                    analyze(&text, original_bits, dot.as_deref(), char_label, &mut out)
                }
            }
        }
        Command::Compress {
            input,
            output,
            symbols,
        } => {
            let bytes = read_file(&input)?;
            let original_bits = bytes.len() as u64 * 8;
            match symbols {
                SymbolMode::Bytes => compress(&bytes, original_bits, &output, &mut out),
                SymbolMode::Chars => {
                    let text = to_chars(&bytes, &input)?;
                    compress(&text, original_bits, &output, &mut out)
                }
            }
        }
        Command::Decompress { input, output } => {
            let bytes = read_file(&input)?;
            let restored = match SymbolKind::detect(&bytes)? {
                SymbolKind::Byte => Archive::<u8>::from_bytes(&bytes)?.decompress()?,
                SymbolKind::Char => Archive::<char>::from_bytes(&bytes)?
                    .decompress()?
                    .into_iter()
                    .collect::<String>()
                    .into_bytes(),
            };
            fs::write(&output, &restored)
                .with_context(|| format!("failed to write {}", output.display()))?;
            writeln!(out, "restored {} bytes to {}", restored.len(), output.display())?;
            Ok(())
        }
    }
}

fn read_file(path: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn to_chars(bytes: &[u8], path: &Path) -> anyhow::Result<Vec<char>> {
    let text = std::str::from_utf8(bytes)
        .with_context(|| format!("{} is not valid UTF-8", path.display()))?;
    Ok(text.chars().collect())
}

fn byte_label(byte: &u8) -> String {
    if byte.is_ascii_graphic() || *byte == b' ' {
        format!("{:?}", char::from(*byte))
    } else {
        format!("0x{byte:02x}")
    }
}

fn char_label(c: &char) -> String {
    format!("{c:?}")
}

fn analyze<S, W>(
    symbols: &[S],
    original_bits: u64,
    dot: Option<&Path>,
    label: fn(&S) -> String,
    out: &mut W,
) -> anyhow::Result<()>
where
    S: Symbol + Debug,
    W: Write,
{
    let frequencies =
        FrequencyTable::analyze(symbols.iter().cloned()).context("nothing to analyze")?;
    let tree = HuffmanTree::from_frequencies(&frequencies)?;
    let codes = tree.code_table();

    print_frequencies(&frequencies, label, out)?;
    print_codes(&codes, label, out)?;
    writeln!(out, "\nsize comparison:")?;
    SizeReport::new(original_bits, codes.weighted_length(&frequencies)?).write_to(out)?;

    if let Some(path) = dot {
        let file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        tree.write_dot(&mut writer)?;
        writer.flush()?;
        writeln!(out, "\ntree written to {}", path.display())?;
    }
    Ok(())
}

fn print_frequencies<S: Symbol, W: Write>(
    frequencies: &FrequencyTable<S>,
    label: fn(&S) -> String,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "frequencies:")?;
    for (symbol, count) in frequencies.iter() {
        writeln!(out, "{:>8}: {count}", label(symbol))?;
    }
    Ok(())
}

fn print_codes<S: Symbol, W: Write>(
    codes: &CodeTable<S>,
    label: fn(&S) -> String,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "\ncodes:")?;
    for (symbol, code) in codes.iter() {
        writeln!(out, "{:>8}: {}", label(symbol), code_string(code))?;
    }
    Ok(())
}

fn compress<S: WireSymbol, W: Write>(
    symbols: &[S],
    original_bits: u64,
    output: &Path,
    out: &mut W,
) -> anyhow::Result<()> {
    let archive = Archive::compress(symbols).context("nothing to compress")?;

    let file =
        File::create(output).with_context(|| format!("failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    archive.write_to(&mut writer)?;
    writer.flush()?;

    archive.report(original_bits).write_to(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_labels() {
        assert_eq!(byte_label(&0x00), "0x00");
        assert_eq!(byte_label(&b'\n'), "0x0a");
        assert_eq!(byte_label(&0xff), "0xff");
        assert_eq!(byte_label(&b'a'), "'a'");
        assert_eq!(byte_label(&b' '), "' '");
        assert_eq!(char_label(&'é'), "'é'");
    }

    #[test]
    fn test_to_chars_rejects_invalid_utf8() {
        let path = Path::new("input.txt");
        assert_eq!(to_chars("ação".as_bytes(), path).unwrap(), vec!['a', 'ç', 'ã', 'o']);

        let err = to_chars(&[b'a', 0xff, b'b'], path).unwrap_err();
        assert_eq!(err.to_string(), "input.txt is not valid UTF-8");
    }

    #[test]
    fn test_print_tables() {
        let frequencies = FrequencyTable::analyze(b"aaabbc".iter().copied()).unwrap();
        let codes = HuffmanTree::from_frequencies(&frequencies)
            .unwrap()
            .code_table();

        let mut out = Vec::new();
        print_frequencies(&frequencies, byte_label, &mut out).unwrap();
        print_codes(&codes, byte_label, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "frequencies:\n     'a': 3\n     'b': 2\n     'c': 1\n\
             \ncodes:\n     'a': 0\n     'c': 10\n     'b': 11\n"
        );
    }

    #[test]
    fn test_analyze_reports_sizes() {
        let mut out = Vec::new();
        analyze(&b"aaabbc"[..], 48, None, byte_label, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with(
            "size comparison:\noriginal size:   48 bits\ncompressed size: 9 bits\nreduction:       81.25%\n"
        ));

        let empty: &[u8] = &[];
        let err = analyze(empty, 0, None, byte_label, &mut Vec::<u8>::new()).unwrap_err();
        assert_eq!(err.to_string(), "nothing to analyze");
    }
}
