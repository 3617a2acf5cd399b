use crate::error::{Error, Result};
use crate::Symbol;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parse a whitespace-separated sequence of integer symbols.
///
/// Blank lines and lines starting with `#` are skipped. Any other token that
/// does not parse as a symbol is an error naming its (1-based) line.
pub fn parse_sequence(reader: impl BufRead) -> Result<Vec<Symbol>> {
    let mut symbols = Vec::new();
    for (line_index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        for token in line.split_whitespace() {
            let symbol = token.parse::<Symbol>().map_err(|_| Error::Parse {
                line: line_index + 1,
                token: token.to_string(),
            })?;
            symbols.push(symbol);
        }
    }
    Ok(symbols)
}

/// Read a symbol sequence from the file at `path`.
pub fn read_sequence(path: impl AsRef<Path>) -> Result<Vec<Symbol>> {
    let path = path.as_ref();
    let io_error = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_error)?;
    let symbols = parse_sequence(BufReader::new(file)).map_err(|e| match e {
        Error::Stream(source) => io_error(source),
        e => e,
    })?;
    tracing::debug!(path = %path.display(), len = symbols.len(), "read sequence");
    Ok(symbols)
}

/// Length and value range of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SequenceStats {
    pub len: usize,
    pub min: Symbol,
    pub max: Symbol,
}

impl SequenceStats {
    /// Scan `symbols` once; `None` if there are none.
    pub fn of(symbols: &[Symbol]) -> Option<SequenceStats> {
        let (&first, rest) = symbols.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((first, first), |(min, max), &x| (min.min(x), max.max(x)));
        Some(SequenceStats {
            len: symbols.len(),
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use testresult::TestResult;

    #[test]
    fn parse() -> TestResult {
        let text = "# occupancy bins\n1 3 2\n\n   \n3\t1 2\n#2 2 2\n 2\n";
        assert_eq!(parse_sequence(Cursor::new(text))?, vec![1, 3, 2, 3, 1, 2, 2]);

        // negative values and no trailing newline
        assert_eq!(parse_sequence(Cursor::new("-4 0 -2"))?, vec![-4, 0, -2]);

        // nothing but comments
        assert_eq!(parse_sequence(Cursor::new("# a\n# b\n"))?, Vec::<Symbol>::new());
        assert_eq!(parse_sequence(Cursor::new(""))?, Vec::<Symbol>::new());
        Ok(())
    }

    #[test]
    fn parse_errors() {
        let err = parse_sequence(Cursor::new("1 2\n3 x 4\n")).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, ref token } if token == "x"));
        assert_eq!(err.to_string(), "line 2: invalid symbol \"x\"");

        // out of range for a symbol
        let err = parse_sequence(Cursor::new("99999999999")).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));

        // a comment marker is only recognized at the start of a line
        let err = parse_sequence(Cursor::new("1 # 2")).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, ref token } if token == "#"));
    }

    #[test]
    fn read_missing_file() {
        let err = read_sequence("/nonexistent/frame.txt").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().starts_with("could not read /nonexistent/frame.txt"));
    }

    #[test]
    fn read_file() -> TestResult {
        let path = std::env::temp_dir().join(format!("sequence-read-{}.txt", std::process::id()));
        std::fs::write(&path, "# frame\n5 6\n7\n")?;
        let symbols = read_sequence(&path);
        std::fs::remove_file(&path)?;
        assert_eq!(symbols?, vec![5, 6, 7]);
        Ok(())
    }

    #[test]
    fn stats() {
        assert_eq!(SequenceStats::of(&[]), None);
        assert_eq!(
            SequenceStats::of(&[3, -1, 8, 2]),
            Some(SequenceStats {
                len: 4,
                min: -1,
                max: 8
            })
        );
        assert_eq!(
            SequenceStats::of(&[5]),
            Some(SequenceStats {
                len: 1,
                min: 5,
                max: 5
            })
        );
    }
}
