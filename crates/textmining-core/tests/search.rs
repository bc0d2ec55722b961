//! End-to-end searches over plain-text documents on disk

use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use textmining_core::{
    FileSearchCounter, PlainTextExtractor, ReportShape, SearchConfig, SearchEngine, SearchError,
    SearchOptions, NO_RESULTS,
};

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new(document: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("report.txt"), document).unwrap();
        fs::create_dir(dir.path().join("logs")).unwrap();
        Self { dir }
    }

    fn document(&self) -> PathBuf {
        self.dir.path().join("report.txt")
    }

    fn logs(&self) -> PathBuf {
        self.dir.path().join("logs")
    }

    fn counter(&self) -> PathBuf {
        self.dir.path().join("SearchsDone.txt")
    }

    fn engine(&self, shape: ReportShape) -> SearchEngine {
        SearchEngine::new(
            Box::new(PlainTextExtractor),
            Box::new(FileSearchCounter::new(self.counter())),
        )
        .with_options(SearchOptions::default().with_shape(shape))
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn or_search_reports_each_matching_line() {
    let ws = Workspace::new("cat sat\ndog ran\nbird flew");
    let report = ws
        .engine(ReportShape::LineDump)
        .search(&ws.document(), &ws.logs(), "cat OR dog")
        .unwrap();

    assert_eq!(
        report.lines(),
        [
            "Resultados (condição OU):",
            "cat sat | Page: 1 | Line: 0",
            "dog ran | Page: 1 | Line: 1",
        ]
    );
}

#[test]
fn and_search_narrows_per_page() {
    let ws = Workspace::new("cat dog\ncat only\ndog only\x0Conly a DOG and a Cat");
    let report = ws
        .engine(ReportShape::LineDump)
        .search(&ws.document(), &ws.logs(), "cat AND dog")
        .unwrap();

    assert_eq!(
        report.lines(),
        [
            "Resultados (condição E):",
            "cat dog | Page: 1 | Line: 0",
            "only a DOG and a Cat | Page: 2 | Line: 0",
        ]
    );
}

#[test]
fn header_waits_for_first_page_with_content() {
    let ws = Workspace::new("nothing\x0Cstill nothing\x0Cthe needle");
    let report = ws
        .engine(ReportShape::LineDump)
        .search(&ws.document(), &ws.logs(), "Needle")
        .unwrap();

    assert_eq!(
        report.lines(),
        [
            "Resultados (condição simples):",
            "the needle | Page: 3 | Line: 0",
        ]
    );
}

#[test]
fn empty_result_yields_single_fallback_line() {
    let ws = Workspace::new("alpha\nbeta");
    let report = ws
        .engine(ReportShape::LineDump)
        .search(&ws.document(), &ws.logs(), "gamma OR delta")
        .unwrap();

    assert_eq!(report.into_lines(), vec![NO_RESULTS.to_string()]);
    assert_eq!(read(&ws.logs().join("TextMiningLog.log")), "Nenhum registro encontrado.\n");
}

#[test]
fn log_is_appended_across_searches() {
    let ws = Workspace::new("cat");
    let mut engine = ws.engine(ReportShape::LineDump);
    engine.search(&ws.document(), &ws.logs(), "cat").unwrap();
    engine.search(&ws.document(), &ws.logs(), "dog").unwrap();

    assert_eq!(
        read(&ws.logs().join("TextMiningLog.log")),
        "Resultados (condição simples):\ncat | Page: 1 | Line: 0\nNenhum registro encontrado.\n"
    );
}

#[test]
fn repeated_search_is_identical_except_counter() {
    let ws = Workspace::new("ababab here\nand cat\x0Ccat cat cat");

    let first = ws
        .engine(ReportShape::LineDump)
        .search(&ws.document(), &ws.logs(), "ab OR cat")
        .unwrap();
    let second = ws
        .engine(ReportShape::LineDump)
        .search(&ws.document(), &ws.logs(), "ab OR cat")
        .unwrap();
    assert_eq!(first, second);

    let summary_one = ws
        .engine(ReportShape::OccurrenceSummary)
        .search(&ws.document(), &ws.logs(), "ab OR cat")
        .unwrap();
    let summary_two = ws
        .engine(ReportShape::OccurrenceSummary)
        .search(&ws.document(), &ws.logs(), "ab OR cat")
        .unwrap();
    assert_eq!(summary_one.lines()[1], "Número da consulta: 3");
    assert_eq!(summary_two.lines()[1], "Número da consulta: 4");
    assert_eq!(summary_one.lines()[4], summary_two.lines()[4]);
    assert_eq!(summary_one.lines()[4], "Ocorrências: ab ( 2 ) cat ( 3 ) ");
}

#[test]
fn summary_block_is_written_to_history() {
    let ws = Workspace::new("Contrato de locação\nlocação residencial");
    fs::write(ws.counter(), "12").unwrap();

    let report = ws
        .engine(ReportShape::OccurrenceSummary)
        .search(&ws.document(), &ws.logs(), "locação")
        .unwrap();

    let expected = [
        "********************************************",
        "Número da consulta: 13",
        "Nome do documento: report.txt",
        "String de busca: locação",
        "Ocorrências: locação ( 2 ) ",
        "********************************************",
    ];
    assert_eq!(report.lines(), expected);
    assert_eq!(
        read(&ws.logs().join("TextMiningHistory.txt")),
        format!("{}\n", expected.join("\n"))
    );
    assert_eq!(read(&ws.counter()), "13\n");
    assert!(!ws.logs().join("TextMiningLog.log").exists());
}

#[test]
fn summary_and_suppresses_pairs_when_a_term_is_absent() {
    let ws = Workspace::new("cat\x0Ccat again");
    let report = ws
        .engine(ReportShape::OccurrenceSummary)
        .search(&ws.document(), &ws.logs(), "cat AND dog")
        .unwrap();
    assert_eq!(report.lines()[4], "Ocorrências: ");
}

#[test]
fn counter_is_bumped_even_without_matches() {
    let ws = Workspace::new("alpha");
    ws.engine(ReportShape::LineDump)
        .search(&ws.document(), &ws.logs(), "omega")
        .unwrap();
    assert_eq!(read(&ws.counter()), "1\n");
}

#[test]
fn validation_errors_have_no_side_effects() {
    let ws = Workspace::new("alpha");
    let mut engine = ws.engine(ReportShape::LineDump);

    let err = engine
        .search(&ws.dir.path().join("missing.pdf"), &ws.logs(), "alpha")
        .unwrap_err();
    assert!(matches!(err, SearchError::DocumentNotFound(_)));

    let err = engine
        .search(&ws.document(), &ws.dir.path().join("no-logs"), "alpha")
        .unwrap_err();
    assert!(matches!(err, SearchError::LogPathNotFound(_)));

    // A file is not a log directory
    let err = engine
        .search(&ws.document(), &ws.document(), "alpha")
        .unwrap_err();
    assert!(matches!(err, SearchError::LogPathNotFound(_)));

    let err = engine
        .search(&ws.document(), &ws.logs(), "")
        .unwrap_err();
    assert!(matches!(err, SearchError::InvalidCondition(_)));

    assert!(fs::read_dir(ws.logs()).unwrap().next().is_none());
    assert!(!ws.counter().exists());
}

#[test]
fn engine_from_config_folds_diacritics() {
    let ws = Workspace::new("Ação imediata\nacao tardia\nnada");
    let mut config = SearchConfig::from_str("[report]\nfold_diacritics = true\n").unwrap();
    config.counter.path = ws.counter();

    let report = SearchEngine::from_config(Box::new(PlainTextExtractor), &config)
        .search(&ws.document(), &ws.logs(), "AÇÃO")
        .unwrap();

    assert_eq!(
        report.lines(),
        [
            "Resultados (condição simples):",
            "Ação imediata | Page: 1 | Line: 0",
            "acao tardia | Page: 1 | Line: 1",
        ]
    );
}

#[test]
fn existing_provenance_is_not_duplicated() {
    let ws = Workspace::new("cat | Page: 4 | Line: 2\nplain cat");
    let report = ws
        .engine(ReportShape::LineDump)
        .search(&ws.document(), &ws.logs(), "cat")
        .unwrap();

    assert_eq!(
        report.lines(),
        [
            "Resultados (condição simples):",
            "cat | Page: 4 | Line: 2",
            "plain cat | Page: 1 | Line: 1",
        ]
    );
}
