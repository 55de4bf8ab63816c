//! End-to-end n-gram counting: source to trie to sink

use crate::config::{BuildConfig, PrintConfig};
use crate::error::Result;
use crate::io::{ByteSink, ByteSource, Counted, FoldCase};
use crate::printer::Printer;
use crate::tokenizer::Tokenizer;
use crate::trie::Trie;
use crate::window::SlidingWindow;
use std::time::{Duration, Instant};

/// Figures collected over one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    /// Bytes pulled from the source
    pub bytes_read: u64,
    /// Bytes pushed to the sink
    pub bytes_written: u64,
    /// Tokens produced by the tokenizer
    pub tokens: u64,
    /// Windows inserted into the trie
    pub windows: u64,
    /// N-gram nodes in the finished trie
    pub nodes: usize,
    /// Lines printed
    pub lines: u64,
    /// Wall time for build and print
    pub duration: Duration,
}

/// Tokenize `source` and count every window into a new trie
///
/// Each ready window is inserted oldest token first. The tokenizer stops on
/// the first error, which is returned unchanged.
pub fn build_trie<S: ByteSource>(source: S, config: &BuildConfig) -> Result<Trie> {
    let (trie, _) = build_counting(source, config)?;
    Ok(trie)
}

fn build_counting<S: ByteSource>(source: S, config: &BuildConfig) -> Result<(Trie, u64)> {
    let mut trie = Trie::new();
    let mut window = SlidingWindow::new(config.max_order, config.warm_up);
    let mut tokens = Tokenizer::new(source, config.mode.clone());

    for token in tokens.by_ref() {
        if window.push(token?)? {
            trie.insert(window.iter())?;
        }
    }

    log::debug!(
        "built trie: {} tokens, {} windows, {} nodes, depth {}",
        tokens.emitted(),
        trie.insertions(),
        trie.len(),
        trie.max_depth()
    );
    Ok((trie, tokens.emitted()))
}

/// Builds and prints n-gram tries with a fixed configuration
#[derive(Debug, Clone)]
pub struct NgramProcessor {
    build: BuildConfig,
    print: PrintConfig,
}

impl NgramProcessor {
    /// Create a processor; both configurations are checked up front
    pub fn new(build: BuildConfig, print: PrintConfig) -> Result<Self> {
        build.validate()?;
        print.validate()?;
        Ok(Self { build, print })
    }

    /// Build configuration in use
    pub fn build_config(&self) -> &BuildConfig {
        &self.build
    }

    /// Print configuration in use
    pub fn print_config(&self) -> &PrintConfig {
        &self.print
    }

    /// Count the n-grams of `source`, folding case if configured
    pub fn build<S: ByteSource>(&self, source: S) -> Result<Trie> {
        Ok(self.build_inner(source)?.0)
    }

    fn build_inner<S: ByteSource>(&self, source: S) -> Result<(Trie, u64)> {
        if self.print.fold_case {
            build_counting(FoldCase::new(source), &self.build)
        } else {
            build_counting(source, &self.build)
        }
    }

    /// Print `trie` into `sink`, returning the number of lines
    pub fn print<K: ByteSink + ?Sized>(&self, trie: &Trie, sink: &mut K) -> Result<u64> {
        Printer::new(&self.print).print(trie, sink)
    }

    /// Build from `source` then print into `sink`
    pub fn process<S, K>(&self, source: S, sink: &mut K) -> Result<ProcessingStats>
    where
        S: ByteSource,
        K: ByteSink + ?Sized,
    {
        let start = Instant::now();

        let mut counted_source = Counted::new(source);
        let (trie, tokens) = self.build_inner(&mut counted_source)?;

        let mut counted_sink = Counted::new(sink);
        let lines = self.print(&trie, &mut counted_sink)?;

        let stats = ProcessingStats {
            bytes_read: counted_source.count(),
            bytes_written: counted_sink.count(),
            tokens,
            windows: trie.insertions(),
            nodes: trie.len(),
            lines,
            duration: start.elapsed(),
        };
        log::info!(
            "processed {} bytes into {} n-grams in {:?}",
            stats.bytes_read,
            stats.nodes,
            stats.duration
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Layout;
    use crate::io::SliceSource;
    use crate::tokenizer::DelimiterSet;
    use crate::window::WarmUp;

    fn words(max: usize) -> BuildConfig {
        BuildConfig::builder()
            .max_order(max)
            .delimiters(DelimiterSet::new(b" "))
            .build()
            .unwrap()
    }

    #[test]
    fn test_overlapping_window_counts() {
        let trie = build_trie(SliceSource::new(b"aa bb aa bb aa"), &words(2)).unwrap();
        assert_eq!(trie.count(["aa"]), 3);
        assert_eq!(trie.count(["bb"]), 2);
        assert_eq!(trie.count(["aa", "bb"]), 2);
        assert_eq!(trie.count(["bb", "aa"]), 2);
        assert_eq!(trie.insertions(), 5);
    }

    #[test]
    fn test_skip_warm_up_counts() {
        let config = BuildConfig::builder()
            .max_order(2)
            .delimiters(DelimiterSet::new(b" "))
            .warm_up(WarmUp::Skip)
            .build()
            .unwrap();
        let trie = build_trie(SliceSource::new(b"aa bb aa bb aa"), &config).unwrap();
        assert_eq!(trie.count(["aa"]), 2);
        assert_eq!(trie.count(["bb"]), 2);
        assert_eq!(trie.count(["aa", "bb"]), 2);
        assert_eq!(trie.count(["bb", "aa"]), 2);
        assert_eq!(trie.insertions(), 4);
    }

    #[test]
    fn test_depth_bounded_by_max_order() {
        let trie = build_trie(SliceSource::new(b"a b c d e f"), &words(3)).unwrap();
        assert_eq!(trie.max_depth(), 3);
    }

    #[test]
    fn test_process_stats() {
        let processor = NgramProcessor::new(
            words(2),
            PrintConfig::builder()
                .min_order(1)
                .max_order(2)
                .build()
                .unwrap(),
        )
        .unwrap();

        let mut out = Vec::new();
        let stats = processor
            .process(SliceSource::new(b"aa bb aa bb aa"), &mut out)
            .unwrap();

        assert_eq!(stats.bytes_read, 14);
        assert_eq!(stats.bytes_written, out.len() as u64);
        assert_eq!(stats.tokens, 5);
        assert_eq!(stats.windows, 5);
        assert_eq!(stats.nodes, 4);
        assert_eq!(stats.lines, 4);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "2 \"aa\" \"bb\"\n3 \"aa\"\n2 \"bb\" \"aa\"\n2 \"bb\"\n"
        );
    }

    #[test]
    fn test_fold_case() {
        let processor = NgramProcessor::new(
            words(1),
            PrintConfig::builder()
                .fold_case(true)
                .layout(Layout::Flat)
                .build()
                .unwrap(),
        )
        .unwrap();
        let trie = processor.build(SliceSource::new(b"The the THE")).unwrap();
        assert_eq!(trie.count(["the"]), 3);
        assert_eq!(trie.len(), 1);
    }
}
