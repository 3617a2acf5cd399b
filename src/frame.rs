use crate::error::{Error, Result};
use crate::rangecount::{count_region_in_interval, count_symbol_in_interval, occupancy_fraction};
use crate::ranktree::RankTree;
use crate::sequence::{read_sequence, SequenceStats};
use crate::Symbol;
use serde::Serialize;
use std::path::Path;

/// Number of leading symbols shown in a frame summary.
pub const PREVIEW_LEN: usize = 10;

/// A named symbol sequence together with its value range and rank tree.
#[derive(Debug, Clone)]
pub struct Frame {
    name: String,
    symbols: Vec<Symbol>,
    min_symbol: Symbol,
    max_symbol: Symbol,
    tree: RankTree,
}

/// Band count over an interval, and the fraction of the interval it covers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Occupancy {
    pub count: usize,
    pub fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameSummary {
    pub name: String,
    pub len: usize,
    pub min: Symbol,
    pub max: Symbol,
    pub preview: Vec<Symbol>,
}

/// Occupancy of a band over one whole frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub frame: usize,
    pub name: String,
    pub fraction: f64,
}

impl Frame {
    pub fn new(name: impl Into<String>, symbols: Vec<Symbol>) -> Result<Frame> {
        let name = name.into();
        // The value range comes from its own scan rather than from the tree.
        let Some(SequenceStats { min, max, .. }) = SequenceStats::of(&symbols) else {
            return Err(Error::EmptySequence { name });
        };
        let tree = RankTree::new(&symbols);
        Ok(Frame {
            name,
            symbols,
            min_symbol: min,
            max_symbol: max,
            tree,
        })
    }

    /// Read a frame from a sequence file, named after its path.
    pub fn load(path: impl AsRef<Path>) -> Result<Frame> {
        let path = path.as_ref();
        let frame = Frame::new(path.display().to_string(), read_sequence(path)?)?;
        tracing::info!(
            name = %frame.name,
            len = frame.len(),
            min = frame.min_symbol,
            max = frame.max_symbol,
            "loaded frame"
        );
        Ok(frame)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn tree(&self) -> &RankTree {
        &self.tree
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Frames always hold at least one symbol.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn min_symbol(&self) -> Symbol {
        self.min_symbol
    }

    pub fn max_symbol(&self) -> Symbol {
        self.max_symbol
    }

    /// The first `limit` symbols (fewer if the frame is shorter).
    pub fn preview(&self, limit: usize) -> &[Symbol] {
        &self.symbols[..limit.min(self.len())]
    }

    pub fn summary(&self) -> FrameSummary {
        FrameSummary {
            name: self.name.clone(),
            len: self.len(),
            min: self.min_symbol,
            max: self.max_symbol,
            preview: self.preview(PREVIEW_LEN).to_vec(),
        }
    }

    /// Occurrences of `symbol` in `0..=index`, rejecting indices past the end.
    pub fn rank(&self, symbol: Symbol, index: usize) -> Result<usize> {
        if index >= self.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(self.tree.rank(symbol, index))
    }

    /// Occurrences of `symbol` in `start..=end`.
    pub fn count_symbol(&self, symbol: Symbol, start: usize, end: usize) -> Result<usize> {
        self.check_range(start, end)?;
        Ok(count_symbol_in_interval(&self.tree, symbol, start, end))
    }

    /// Positions in `start..=end` whose symbol lies in the band, clamped to this frame's range.
    pub fn count_region(&self, low: Symbol, high: Symbol, start: usize, end: usize) -> Result<usize> {
        self.check_range(start, end)?;
        Ok(count_region_in_interval(
            &self.tree,
            low,
            high,
            self.min_symbol,
            self.max_symbol,
            start,
            end,
        ))
    }

    pub fn region_occupancy(
        &self,
        low: Symbol,
        high: Symbol,
        start: usize,
        end: usize,
    ) -> Result<Occupancy> {
        let count = self.count_region(low, high, start, end)?;
        Ok(Occupancy {
            count,
            fraction: occupancy_fraction(count, start, end),
        })
    }

    fn check_range(&self, start: usize, end: usize) -> Result<()> {
        if start > end || end >= self.len() {
            return Err(Error::InvalidRange {
                start,
                end,
                len: self.len(),
            });
        }
        Ok(())
    }
}

/// Frames in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct FrameSet {
    frames: Vec<Frame>,
}

impl FrameSet {
    pub fn new() -> FrameSet {
        FrameSet::default()
    }

    /// Add a frame, returning its index.
    pub fn push(&mut self, frame: Frame) -> usize {
        self.frames.push(frame);
        self.frames.len() - 1
    }

    pub fn get(&self, index: usize) -> Result<&Frame> {
        if self.frames.is_empty() {
            return Err(Error::NoFrames);
        }
        self.frames.get(index).ok_or(Error::UnknownFrame {
            index,
            count: self.frames.len(),
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn summaries(&self) -> Vec<FrameSummary> {
        self.frames.iter().map(Frame::summary).collect()
    }

    /// Occupancy fraction of the band over each frame in its entirety.
    pub fn region_series(&self, low: Symbol, high: Symbol) -> Result<Vec<SeriesPoint>> {
        if self.frames.is_empty() {
            return Err(Error::NoFrames);
        }
        self.frames
            .iter()
            .enumerate()
            .map(|(index, frame)| {
                let occupancy = frame.region_occupancy(low, high, 0, frame.len() - 1)?;
                Ok(SeriesPoint {
                    frame: index,
                    name: frame.name.clone(),
                    fraction: occupancy.fraction,
                })
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a FrameSet {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
