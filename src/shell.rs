use crate::error::{Error, Result};
use crate::frame::{Frame, FrameSet, PREVIEW_LEN};
use crate::Symbol;
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::str::FromStr;

const MENU: &str = "\
Wavelet tree occupancy (multi-frame)
1) Add frame from file
2) Show summary of all frames
3) Per-frame rank(c, index)
4) Per-frame count symbol c in [L, R]
5) Per-frame count region [bin_low, bin_high] in [L, R]
6) Time series: region fraction per frame
0) Quit
Choice: ";

/// Interactive menu over a set of frames, driven by whitespace-separated tokens.
#[derive(Debug, Default)]
pub struct Shell {
    frames: FrameSet,
}

// Outcome of a menu command that did not fail.
enum Step {
    Continue,
    // the input ended or a token did not parse
    InputError,
}

impl Shell {
    pub fn new(frames: FrameSet) -> Shell {
        Shell { frames }
    }

    pub fn frames(&self) -> &FrameSet {
        &self.frames
    }

    /// Run the menu until the user quits or the input runs out.
    ///
    /// Query errors are reported on `output` and the loop continues; only
    /// failures to read or write the streams themselves are returned.
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> Result<()> {
        let mut tokens = Tokens::new(input);
        loop {
            write!(output, "{MENU}")?;
            output.flush()?;

            let Some(choice) = tokens.next::<i64>()? else {
                writeln!(output, "Input error, exiting now!")?;
                break;
            };

            let step = match choice {
                0 => {
                    writeln!(output, "Goodbye!")?;
                    break;
                }
                1 => self.add_frame(&mut tokens, &mut output),
                2 => self.summary(&mut output),
                3 => self.rank(&mut tokens, &mut output),
                4 => self.count_symbol(&mut tokens, &mut output),
                5 => self.count_region(&mut tokens, &mut output),
                6 => self.series(&mut tokens, &mut output),
                _ => {
                    writeln!(output, "Unknown choice.")?;
                    Ok(Step::Continue)
                }
            };

            match step {
                Ok(Step::Continue) => {}
                Ok(Step::InputError) => {
                    writeln!(output, "Input error, exiting now!")?;
                    break;
                }
                Err(Error::Stream(e)) => return Err(Error::Stream(e)),
                Err(e) => {
                    tracing::warn!(choice, error = %e, "query failed");
                    writeln!(output, "error: {e}")?;
                }
            }
            writeln!(output)?;
        }
        output.flush()?;
        Ok(())
    }

    fn add_frame<R: BufRead>(&mut self, tokens: &mut Tokens<R>, output: &mut impl Write) -> Result<Step> {
        let Some(path) = prompt::<String, _>(tokens, output, "Enter frame file path: ")? else {
            return Ok(Step::InputError);
        };
        let frame = Frame::load(&path)?;
        writeln!(
            output,
            "Loaded frame \"{}\" length={} range=[{}, {}]",
            frame.name(),
            frame.len(),
            frame.min_symbol(),
            frame.max_symbol()
        )?;
        self.frames.push(frame);
        Ok(Step::Continue)
    }

    fn summary(&self, output: &mut impl Write) -> Result<Step> {
        if self.frames.is_empty() {
            return Err(Error::NoFrames);
        }
        writeln!(output, "Total frames: {}", self.frames.len())?;
        for (index, frame) in self.frames.iter().enumerate() {
            write_frame_line(output, index, frame)?;
            let preview: Vec<String> = frame
                .preview(PREVIEW_LEN)
                .iter()
                .map(Symbol::to_string)
                .collect();
            writeln!(output, "First up to {} bins: {}", PREVIEW_LEN, preview.join(" "))?;
        }
        Ok(Step::Continue)
    }

    fn rank<R: BufRead>(&self, tokens: &mut Tokens<R>, output: &mut impl Write) -> Result<Step> {
        let Some(frame) = self.choose_frame(tokens, output)? else {
            return Ok(Step::InputError);
        };
        let Some(symbol) = prompt::<Symbol, _>(tokens, output, "Enter symbol c: ")? else {
            return Ok(Step::InputError);
        };
        let Some(index) = prompt::<usize, _>(tokens, output, "Enter index i: ")? else {
            return Ok(Step::InputError);
        };
        let rank = frame.rank(symbol, index)?;
        writeln!(output, "rank({symbol}, {index}) = {rank}")?;
        Ok(Step::Continue)
    }

    fn count_symbol<R: BufRead>(&self, tokens: &mut Tokens<R>, output: &mut impl Write) -> Result<Step> {
        let Some(frame) = self.choose_frame(tokens, output)? else {
            return Ok(Step::InputError);
        };
        let Some(symbol) = prompt::<Symbol, _>(tokens, output, "Enter symbol c: ")? else {
            return Ok(Step::InputError);
        };
        let Some((start, end)) = prompt_interval(tokens, output)? else {
            return Ok(Step::InputError);
        };
        let count = frame.count_symbol(symbol, start, end)?;
        writeln!(output, "Count = {count}")?;
        Ok(Step::Continue)
    }

    fn count_region<R: BufRead>(&self, tokens: &mut Tokens<R>, output: &mut impl Write) -> Result<Step> {
        let Some(frame) = self.choose_frame(tokens, output)? else {
            return Ok(Step::InputError);
        };
        let Some((low, high)) = prompt_band(tokens, output)? else {
            return Ok(Step::InputError);
        };
        let Some((start, end)) = prompt_interval(tokens, output)? else {
            return Ok(Step::InputError);
        };
        let occupancy = frame.region_occupancy(low, high, start, end)?;
        writeln!(output, "Region count = {}", occupancy.count)?;
        writeln!(output, "Fraction = {}", occupancy.fraction)?;
        Ok(Step::Continue)
    }

    fn series<R: BufRead>(&self, tokens: &mut Tokens<R>, output: &mut impl Write) -> Result<Step> {
        if self.frames.is_empty() {
            return Err(Error::NoFrames);
        }
        let Some((low, high)) = prompt_band(tokens, output)? else {
            return Ok(Step::InputError);
        };
        writeln!(output, "Region time-series:")?;
        for point in self.frames.region_series(low, high)? {
            writeln!(output, "[{}] {} fraction={}", point.frame, point.name, point.fraction)?;
        }
        Ok(Step::Continue)
    }

    // List the frames and ask for one. `None` means the input gave out.
    fn choose_frame<R: BufRead>(
        &self,
        tokens: &mut Tokens<R>,
        output: &mut impl Write,
    ) -> Result<Option<&Frame>> {
        if self.frames.is_empty() {
            return Err(Error::NoFrames);
        }
        writeln!(output, "Available frames:")?;
        for (index, frame) in self.frames.iter().enumerate() {
            write_frame_line(output, index, frame)?;
        }
        let Some(index) = prompt::<usize, _>(tokens, output, "Enter frame index: ")? else {
            return Ok(None);
        };
        self.frames.get(index).map(Some)
    }
}

fn write_frame_line(output: &mut impl Write, index: usize, frame: &Frame) -> Result<()> {
    writeln!(
        output,
        "[{}] {} length={} range=[{}, {}]",
        index,
        frame.name(),
        frame.len(),
        frame.min_symbol(),
        frame.max_symbol()
    )?;
    Ok(())
}

fn prompt<T: FromStr, R: BufRead>(
    tokens: &mut Tokens<R>,
    output: &mut impl Write,
    message: &str,
) -> Result<Option<T>> {
    write!(output, "{message}")?;
    output.flush()?;
    Ok(tokens.next()?)
}

fn prompt_band<R: BufRead>(
    tokens: &mut Tokens<R>,
    output: &mut impl Write,
) -> Result<Option<(Symbol, Symbol)>> {
    let Some(low) = prompt(tokens, output, "Enter bin_low: ")? else {
        return Ok(None);
    };
    let Some(high) = prompt(tokens, output, "Enter bin_high: ")? else {
        return Ok(None);
    };
    Ok(Some((low, high)))
}

fn prompt_interval<R: BufRead>(
    tokens: &mut Tokens<R>,
    output: &mut impl Write,
) -> Result<Option<(usize, usize)>> {
    let Some(start) = prompt(tokens, output, "Enter L: ")? else {
        return Ok(None);
    };
    let Some(end) = prompt(tokens, output, "Enter R: ")? else {
        return Ok(None);
    };
    Ok(Some((start, end)))
}

/// Whitespace-separated tokens read lazily, a line at a time.
struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Next token parsed as `T`. `None` at end of input or if the token does not parse.
    fn next<T: FromStr>(&mut self) -> std::io::Result<Option<T>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        let token = self.pending.pop_front();
        let parsed = token.as_deref().map(str::parse::<T>);
        match parsed {
            Some(Ok(value)) => Ok(Some(value)),
            Some(Err(_)) => {
                tracing::warn!(token = ?token, "unparseable input");
                Ok(None)
            }
            None => Ok(None),
        }
    }
}
