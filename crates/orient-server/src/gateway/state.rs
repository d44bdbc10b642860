use std::sync::Arc;

use orient::catalog::CatalogHandle;
use orient::retrieval::Retriever;
use orient::scoring::ResultReducer;

use crate::audit::AuditLog;
use crate::careers::CareerPathStore;
use crate::judge::{JudgeBackend, RelevanceJudge};
use crate::translate::{Localizer, TranslationBackend};

/// Shared per-process state handed to every handler.
///
/// Generic over the judge and translation backends so tests can plug in
/// mocks; production uses `GenaiJudge` and `HttpTranslator`.
pub struct HandlerState<J: JudgeBackend, T: TranslationBackend> {
    pub catalog: Arc<CatalogHandle>,

    pub retriever: Arc<Retriever>,

    pub reducer: ResultReducer,

    pub judge: Arc<RelevanceJudge<J>>,

    pub localizer: Arc<Localizer<T>>,

    pub audit: AuditLog,

    pub careers: CareerPathStore,
}

impl<J: JudgeBackend, T: TranslationBackend> Clone for HandlerState<J, T> {
    fn clone(&self) -> Self {
        Self {
            catalog: self.catalog.clone(),
            retriever: self.retriever.clone(),
            reducer: self.reducer,
            judge: self.judge.clone(),
            localizer: self.localizer.clone(),
            audit: self.audit.clone(),
            careers: self.careers.clone(),
        }
    }
}

impl<J: JudgeBackend, T: TranslationBackend> HandlerState<J, T> {
    pub fn new(
        catalog: Arc<CatalogHandle>,
        retriever: Arc<Retriever>,
        reducer: ResultReducer,
        judge: Arc<RelevanceJudge<J>>,
        localizer: Arc<Localizer<T>>,
        audit: AuditLog,
        careers: CareerPathStore,
    ) -> Self {
        Self {
            catalog,
            retriever,
            reducer,
            judge,
            localizer,
            audit,
            careers,
        }
    }
}
