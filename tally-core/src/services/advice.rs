//! Advice service - prompt construction and fallbacks
//!
//! Summarizes the current books into a prompt for the advisor port.
//! Every outcome is displayable text: a missing credential and a
//! failing service both degrade to fixed strings, never to errors, and
//! stored state is untouched either way.

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::warn;

use crate::domain::{AppState, FlowKind};
use crate::ports::Advisor;

/// Shown when no advice credential is configured.
pub const ADVICE_NOT_CONFIGURED: &str =
    "AI advice is not configured. Set an advice API key to enable analysis.";

/// Shown when the advice service cannot be reached or errors out.
pub const ADVICE_UNAVAILABLE: &str =
    "The advice service could not be reached. Check that your API key is valid and try again.";

/// Shown when the model returns an empty response.
pub const ADVICE_EMPTY: &str = "The advisor returned no response.";

pub struct AdviceService {
    advisor: Option<Arc<dyn Advisor>>,
}

impl AdviceService {
    pub fn new(advisor: Option<Arc<dyn Advisor>>) -> Self {
        Self { advisor }
    }

    /// Ask for advice over the current state.
    pub async fn advise(&self, state: &AppState) -> String {
        let Some(advisor) = &self.advisor else {
            return ADVICE_NOT_CONFIGURED.to_string();
        };

        let prompt = build_prompt(state);
        match advisor.advise(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => ADVICE_EMPTY.to_string(),
            Err(e) => {
                warn!("advice query failed: {e}");
                ADVICE_UNAVAILABLE.to_string()
            }
        }
    }
}

/// Summarize accounts and transactions into the advisor prompt.
pub fn build_prompt(state: &AppState) -> String {
    let total_assets: Decimal = state.accounts.iter().map(|a| a.balance).sum();

    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    let mut by_category: BTreeMap<String, Decimal> = BTreeMap::new();

    for tx in &state.transactions {
        match tx.kind {
            FlowKind::Income => income += tx.amount,
            FlowKind::Expense => expense += tx.amount,
        }
        let name = state
            .category(&tx.category_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "Uncategorized".to_string());
        *by_category.entry(name).or_default() += tx.amount;
    }

    let mut prompt = String::from(
        "You are a professional personal finance advisor. \
         Based on the user's figures below, give concrete suggestions.\n",
    );
    prompt.push_str(&format!("Total assets: {}\n", total_assets));
    prompt.push_str(&format!("Income this period: {}\n", income));
    prompt.push_str(&format!("Spending this period: {}\n", expense));
    prompt.push_str("\nBy category:\n");
    for (name, amount) in &by_category {
        prompt.push_str(&format!("- {}: {}\n", name, amount));
    }
    prompt.push_str("\nAnswer in Markdown with three specific directions for improvement.\n");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::result::{Error, Result};
    use crate::seed;
    use async_trait::async_trait;

    struct CannedAdvisor {
        response: Result<String>,
    }

    #[async_trait]
    impl Advisor for CannedAdvisor {
        async fn advise(&self, _prompt: &str) -> Result<String> {
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(_) => Err(Error::remote("down")),
            }
        }
    }

    #[tokio::test]
    async fn test_missing_credential_yields_fixed_string() {
        let service = AdviceService::new(None);
        assert_eq!(service.advise(&seed::demo_state()).await, ADVICE_NOT_CONFIGURED);
    }

    #[tokio::test]
    async fn test_service_failure_yields_error_string() {
        let advisor = Arc::new(CannedAdvisor {
            response: Err(Error::remote("down")),
        });
        let service = AdviceService::new(Some(advisor));
        assert_eq!(service.advise(&seed::demo_state()).await, ADVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_empty_response_yields_fixed_string() {
        let advisor = Arc::new(CannedAdvisor {
            response: Ok("  ".to_string()),
        });
        let service = AdviceService::new(Some(advisor));
        assert_eq!(service.advise(&seed::demo_state()).await, ADVICE_EMPTY);
    }

    #[tokio::test]
    async fn test_successful_response_passes_through() {
        let advisor = Arc::new(CannedAdvisor {
            response: Ok("Spend less on dining.".to_string()),
        });
        let service = AdviceService::new(Some(advisor));
        assert_eq!(
            service.advise(&seed::demo_state()).await,
            "Spend less on dining."
        );
    }

    #[test]
    fn test_prompt_contains_totals() {
        let prompt = build_prompt(&seed::demo_state());
        // Seed: 125000 + 50000 - 12500 assets; 66200 income; 3930 expense.
        assert!(prompt.contains("Total assets: 162500"));
        assert!(prompt.contains("Income this period: 66200"));
        assert!(prompt.contains("Spending this period: 3930"));
        assert!(prompt.contains("- Dining: 150"));
        assert!(prompt.contains("- Salary: 65000"));
    }
}
