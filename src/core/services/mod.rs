pub mod filter_service;
pub mod statement_service;
pub mod summary_service;

pub use filter_service::FilterService;
pub use statement_service::{
    Statement, StatementEntry, StatementHeader, StatementRow, StatementService,
    EMPTY_PERIOD_MESSAGE,
};
pub use summary_service::{
    CategoryShare, DashboardSummary, DebtTotals, SummaryService, TransactionTotals,
};
