#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    RunQuality,
    ReconcileImages,
    EvaluateBatch,
    HistoryList,
    HistoryRecord,
    HistoryRemove,
    HistoryClear,
    GlossaryList,
    GlossaryAdd,
    GlossaryUpdate,
    GlossaryRemove,
    GlossarySearch,
    GlossaryByCategory,
    GlossaryImport,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "run_quality" => Command::RunQuality,
            "reconcile_images" => Command::ReconcileImages,
            "evaluate_batch" => Command::EvaluateBatch,
            "history.list" => Command::HistoryList,
            "history.record" => Command::HistoryRecord,
            "history.remove" => Command::HistoryRemove,
            "history.clear" => Command::HistoryClear,
            "glossary.list" => Command::GlossaryList,
            "glossary.add" => Command::GlossaryAdd,
            "glossary.update" => Command::GlossaryUpdate,
            "glossary.remove" => Command::GlossaryRemove,
            "glossary.search" => Command::GlossarySearch,
            "glossary.by_category" => Command::GlossaryByCategory,
            "glossary.import" => Command::GlossaryImport,
            _ => Command::Unknown,
        }
    }
}
