use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::listing::{Listing, TranslatedListing};
use crate::services::validator::{self, QualityReport};

#[derive(Debug, Deserialize, Clone)]
pub struct BatchItem {
    pub source: Listing,
    pub translated: TranslatedListing,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BatchOutcome {
    pub evaluated: usize,
    pub skipped: usize,

    /// Alinhado ao índice de entrada; `None` = item pulado por cancelamento.
    pub reports: Vec<Option<QualityReport>>,
}

#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub fn evaluate_batch(items: &[BatchItem], cancel: &CancelToken) -> BatchOutcome {
    evaluate_batch_with(items, num_cpus::get(), cancel)
}

pub fn evaluate_batch_with(
    items: &[BatchItem],
    workers: usize,
    cancel: &CancelToken,
) -> BatchOutcome {
    let workers = workers.clamp(1, items.len().max(1));

    let next = AtomicUsize::new(0);
    let next = &next;

    let (tx, rx) = mpsc::channel::<(usize, QualityReport)>();

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();

            scope.spawn(move || loop {
                // Cancelar impede itens novos; o item em andamento termina
                // e seu relatório é mantido.
                if cancel.is_cancelled() {
                    break;
                }

                let i = next.fetch_add(1, Ordering::SeqCst);
                if i >= items.len() {
                    break;
                }

                let report = validator::evaluate(&items[i].source, &items[i].translated);

                if tx.send((i, report)).is_err() {
                    break;
                }
            });
        }
    });

    drop(tx);

    let mut reports: Vec<Option<QualityReport>> = vec![None; items.len()];
    for (i, report) in rx {
        reports[i] = Some(report);
    }

    let evaluated = reports.iter().filter(|r| r.is_some()).count();
    let skipped = reports.len() - evaluated;

    if skipped > 0 {
        debug!(evaluated, skipped, "batch stopped before completion");
    }

    BatchOutcome {
        evaluated,
        skipped,
        reports,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::listing::TargetLanguage;

    fn item(n: usize) -> BatchItem {
        BatchItem {
            source: Listing {
                url: format!("https://idus.com/p/{n}"),
                description: "10cm, 20cm 제작".to_string(),
                ..Listing::default()
            },
            translated: TranslatedListing {
                title: "Handmade leather wallet".to_string(),
                description: "Available in 10cm and 20cm".to_string(),
                target_language: TargetLanguage::English,
                ..TranslatedListing::default()
            },
        }
    }

    #[test]
    fn evaluates_every_item_in_input_order_slots() {
        let items: Vec<BatchItem> = (0..12).map(item).collect();

        let outcome = evaluate_batch_with(&items, 4, &CancelToken::new());

        assert_eq!(outcome.evaluated, 12);
        assert_eq!(outcome.skipped, 0);
        assert_eq!(outcome.reports.len(), 12);
        assert!(outcome.reports.iter().all(|r| r.is_some()));
    }

    #[test]
    fn per_item_results_match_direct_evaluation() {
        let items: Vec<BatchItem> = (0..6).map(item).collect();

        let outcome = evaluate_batch_with(&items, 3, &CancelToken::new());

        for (i, report) in outcome.reports.iter().enumerate() {
            let direct = validator::evaluate(&items[i].source, &items[i].translated);
            assert_eq!(report.as_ref(), Some(&direct));
        }
    }

    #[test]
    fn cancelled_batch_starts_nothing() {
        let items: Vec<BatchItem> = (0..8).map(item).collect();

        let cancel = CancelToken::new();
        cancel.cancel();

        let outcome = evaluate_batch_with(&items, 4, &cancel);

        assert_eq!(outcome.evaluated, 0);
        assert_eq!(outcome.skipped, 8);
        assert!(outcome.reports.iter().all(|r| r.is_none()));
    }

    #[test]
    fn counts_always_cover_the_whole_batch() {
        let items: Vec<BatchItem> = (0..5).map(item).collect();

        let outcome = evaluate_batch_with(&items, 2, &CancelToken::new());

        assert_eq!(outcome.evaluated + outcome.skipped, items.len());
    }

    #[test]
    fn worker_count_is_clamped_to_batch_size() {
        let items: Vec<BatchItem> = (0..2).map(item).collect();

        // Mais workers que itens não pode travar nem duplicar trabalho.
        let outcome = evaluate_batch_with(&items, 64, &CancelToken::new());

        assert_eq!(outcome.evaluated, 2);
    }

    #[test]
    fn empty_batch_is_a_noop() {
        let outcome = evaluate_batch(&[], &CancelToken::new());

        assert_eq!(outcome.evaluated, 0);
        assert_eq!(outcome.skipped, 0);
        assert!(outcome.reports.is_empty());
    }
}
