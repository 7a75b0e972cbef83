pub mod errors;
pub mod models;
pub mod random;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use models::{
    budget::{BudgetForecast, ExpenseEntry, SavingsGoal},
    chart::BreakdownEntry,
    holding::Holding,
    money::{parse_amount_input, Frequency, MoneyAmount},
    portfolio::{Account, PortfolioSnapshot},
    price::{PricePoint, TimeRange},
    settings::EngineSettings,
};
use random::{RandomSource, SeededRandom};
use services::{
    chart_service::ChartService,
    forecast_service::ForecastService,
    history_service::HistoryService,
    holding_service::{sort_by_value, HoldingPartition, HoldingService},
    range_service::RangeService,
};
use storage::session::{SessionCodec, SessionData};
use uuid::Uuid;

use errors::CoreError;

// ═══════════════════════════════════════════════════════════════════
//  Budget planner
// ═══════════════════════════════════════════════════════════════════

/// Budgeting form state plus the last computed forecast.
///
/// The forecast is only produced by [`BudgetPlanner::calculate`]; editing
/// inputs marks it stale but never recomputes it behind the caller's back.
#[must_use]
pub struct BudgetPlanner {
    income: Option<MoneyAmount>,
    goal: SavingsGoal,
    expenses: Vec<ExpenseEntry>,
    forecast: Option<BudgetForecast>,
    breakdown: Vec<BreakdownEntry>,
    forecast_service: ForecastService,
    chart_service: ChartService,
    /// Inputs changed since the last successful calculation.
    stale: bool,
}

impl std::fmt::Debug for BudgetPlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BudgetPlanner")
            .field("income", &self.income)
            .field("goal", &self.goal)
            .field("expenses", &self.expenses.len())
            .field("calculated", &self.forecast.is_some())
            .field("stale", &self.stale)
            .finish()
    }
}

impl Default for BudgetPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl BudgetPlanner {
    /// Empty planner with the default palette.
    pub fn new() -> Self {
        Self::with_settings(&EngineSettings::default())
    }

    pub fn with_settings(settings: &EngineSettings) -> Self {
        Self {
            income: None,
            goal: SavingsGoal::default(),
            expenses: Vec::new(),
            forecast: None,
            breakdown: Vec::new(),
            forecast_service: ForecastService::new(),
            chart_service: ChartService::new(settings.chart_palette.len()),
            stale: false,
        }
    }

    // ── Income & Goal ───────────────────────────────────────────────

    pub fn set_income(&mut self, income: MoneyAmount) {
        self.income = Some(income);
        self.stale = true;
    }

    /// Set income from form text. Non-numeric text clears the income, so
    /// the next calculation is rejected.
    pub fn set_income_input(&mut self, input: &str, frequency: Frequency) {
        self.income = parse_amount_input(input).map(|a| MoneyAmount::new(a, frequency));
        self.stale = true;
    }

    #[must_use]
    pub fn income(&self) -> Option<&MoneyAmount> {
        self.income.as_ref()
    }

    pub fn set_goal(&mut self, goal: SavingsGoal) {
        self.goal = goal;
        self.stale = true;
    }

    #[must_use]
    pub fn goal(&self) -> SavingsGoal {
        self.goal
    }

    // ── Expense Rows ────────────────────────────────────────────────

    /// Add an expense row. Rows with a missing or non-positive amount are
    /// kept but do not count towards totals.
    pub fn add_expense(
        &mut self,
        category: impl Into<String>,
        amount: Option<f64>,
        frequency: Frequency,
    ) -> Result<Uuid, CoreError> {
        let entry = ExpenseEntry::new(category, amount, frequency)?;
        let id = entry.id;
        self.expenses.push(entry);
        self.stale = true;
        Ok(id)
    }

    /// Add an expense row from form text.
    pub fn add_expense_input(
        &mut self,
        category: impl Into<String>,
        amount: &str,
        frequency: Frequency,
    ) -> Result<Uuid, CoreError> {
        self.add_expense(category, parse_amount_input(amount), frequency)
    }

    pub fn update_expense_category(
        &mut self,
        id: Uuid,
        category: impl Into<String>,
    ) -> Result<(), CoreError> {
        self.expense_mut(id)?.set_category(category)?;
        self.stale = true;
        Ok(())
    }

    pub fn update_expense_amount(&mut self, id: Uuid, amount: Option<f64>) -> Result<(), CoreError> {
        self.expense_mut(id)?.amount = amount;
        self.stale = true;
        Ok(())
    }

    pub fn update_expense_frequency(
        &mut self,
        id: Uuid,
        frequency: Frequency,
    ) -> Result<(), CoreError> {
        self.expense_mut(id)?.frequency = frequency;
        self.stale = true;
        Ok(())
    }

    /// Remove an expense row, returning it.
    pub fn remove_expense(&mut self, id: Uuid) -> Result<ExpenseEntry, CoreError> {
        let idx = self
            .expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CoreError::ExpenseNotFound(id.to_string()))?;
        self.stale = true;
        Ok(self.expenses.remove(idx))
    }

    /// All rows in entry order, including ones that do not count.
    #[must_use]
    pub fn expenses(&self) -> &[ExpenseEntry] {
        &self.expenses
    }

    // ── Forecast ────────────────────────────────────────────────────

    /// Recompute the forecast and its breakdown from the current inputs.
    ///
    /// On a validation failure the previous forecast (or none) is kept.
    pub fn calculate(&mut self) -> Result<&BudgetForecast, CoreError> {
        let income = self.income.ok_or_else(|| {
            CoreError::ValidationError("Please enter a valid income amount greater than zero".into())
        })?;
        let forecast = self
            .forecast_service
            .calculate(&income, &self.expenses, self.goal)?;
        self.breakdown = self.chart_service.to_breakdown(&self.expenses, &forecast);
        self.stale = false;
        let stored = self.forecast.insert(forecast);
        Ok(&*stored)
    }

    /// Last successful forecast, if any.
    #[must_use]
    pub fn forecast(&self) -> Option<&BudgetForecast> {
        self.forecast.as_ref()
    }

    /// Breakdown computed alongside the last successful forecast.
    #[must_use]
    pub fn breakdown(&self) -> &[BreakdownEntry] {
        &self.breakdown
    }

    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    // ── Internal ────────────────────────────────────────────────────

    fn expense_mut(&mut self, id: Uuid) -> Result<&mut ExpenseEntry, CoreError> {
        self.expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CoreError::ExpenseNotFound(id.to_string()))
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Portfolio dashboard
// ═══════════════════════════════════════════════════════════════════

/// In-memory investments view for one session.
///
/// Loaded once from stored session data; holdings are re-derived on load
/// and kept sorted by value. Mutations set a dirty flag so the caller
/// knows to write the session back.
#[must_use]
pub struct PortfolioDashboard<R: RandomSource = SeededRandom> {
    snapshot: PortfolioSnapshot,
    holding_service: HoldingService,
    range_service: RangeService,
    rng: R,
    dirty: bool,
}

impl<R: RandomSource> std::fmt::Debug for PortfolioDashboard<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioDashboard")
            .field("total_value", &self.snapshot.total_value)
            .field("holdings", &self.snapshot.holdings.len())
            .field("accounts", &self.snapshot.accounts.len())
            .field("history_points", &self.snapshot.history.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl PortfolioDashboard<SeededRandom> {
    /// Load from a stored session blob with default settings and an
    /// entropy-seeded random source. Malformed data gives an empty portfolio.
    pub fn load(raw: Option<&str>, today: NaiveDate) -> Self {
        Self::load_with(raw, EngineSettings::default(), today, SeededRandom::from_entropy())
    }
}

impl<R: RandomSource> PortfolioDashboard<R> {
    pub fn load_with(raw: Option<&str>, settings: EngineSettings, today: NaiveDate, rng: R) -> Self {
        Self::from_session(SessionCodec::decode(raw), settings, today, rng)
    }

    pub fn from_session(
        session: SessionData,
        settings: EngineSettings,
        today: NaiveDate,
        mut rng: R,
    ) -> Self {
        let range_service = RangeService::new(HistoryService::new(settings.portfolio_step_scale));
        let holding_service = HoldingService::new(settings);
        let mut snapshot = session.investments;
        snapshot.holdings = holding_service.aggregate(snapshot.holdings, today, &mut rng);

        Self {
            snapshot,
            holding_service,
            range_service,
            rng,
            dirty: false,
        }
    }

    // ── Read Side ───────────────────────────────────────────────────

    #[must_use]
    pub fn snapshot(&self) -> &PortfolioSnapshot {
        &self.snapshot
    }

    /// Holdings sorted by value, largest first.
    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        &self.snapshot.holdings
    }

    #[must_use]
    pub fn partition(&self) -> HoldingPartition<'_> {
        self.holding_service.partition(&self.snapshot.holdings)
    }

    /// Stocks and ETFs, sorted by value.
    #[must_use]
    pub fn equity_holdings(&self) -> Vec<&Holding> {
        self.partition().equities
    }

    /// Crypto holdings, sorted by value.
    #[must_use]
    pub fn crypto_holdings(&self) -> Vec<&Holding> {
        self.partition().crypto
    }

    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.snapshot.accounts
    }

    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.snapshot.total_value
    }

    #[must_use]
    pub fn holdings_value(&self) -> f64 {
        self.snapshot.holdings_value()
    }

    /// Portfolio history for a chart, narrowed to `range`. Always at least
    /// two points.
    pub fn filtered_history(&mut self, range: TimeRange, today: NaiveDate) -> Vec<PricePoint> {
        self.range_service.filter_to_range(
            &self.snapshot.history,
            self.snapshot.total_value,
            range,
            today,
            &mut self.rng,
        )
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// Add a holding. A ticker may only appear once.
    pub fn add_holding(&mut self, mut holding: Holding, today: NaiveDate) -> Result<(), CoreError> {
        validate_non_negative("quantity", holding.quantity)?;
        validate_non_negative("price", holding.current_price)?;
        holding.ticker = holding.ticker.trim().to_uppercase();
        if self.find_holding(&holding.ticker).is_some() {
            return Err(CoreError::ValidationError(format!(
                "Holding {} already exists",
                holding.ticker
            )));
        }
        let mut added = self.holding_service.aggregate(vec![holding], today, &mut self.rng);
        self.snapshot.holdings.append(&mut added);
        self.resort();
        Ok(())
    }

    pub fn update_holding_quantity(&mut self, ticker: &str, quantity: f64) -> Result<(), CoreError> {
        validate_non_negative("quantity", quantity)?;
        self.holding_mut(ticker)?.set_quantity(quantity);
        self.resort();
        Ok(())
    }

    pub fn update_holding_price(&mut self, ticker: &str, price: f64) -> Result<(), CoreError> {
        validate_non_negative("price", price)?;
        self.holding_mut(ticker)?.set_current_price(price);
        self.resort();
        Ok(())
    }

    /// Remove a holding by ticker (case-insensitive), returning it.
    pub fn remove_holding(&mut self, ticker: &str) -> Result<Holding, CoreError> {
        let idx = self
            .find_holding(ticker)
            .ok_or_else(|| CoreError::HoldingNotFound(ticker.to_string()))?;
        self.dirty = true;
        Ok(self.snapshot.holdings.remove(idx))
    }

    // ── Accounts ────────────────────────────────────────────────────

    pub fn add_account(&mut self, account: Account) -> Result<(), CoreError> {
        if self.snapshot.accounts.iter().any(|a| a.id == account.id) {
            return Err(CoreError::ValidationError(format!(
                "Account {} already exists",
                account.id
            )));
        }
        self.snapshot.accounts.push(account);
        self.dirty = true;
        Ok(())
    }

    pub fn remove_account(&mut self, id: &str) -> Result<Account, CoreError> {
        let idx = self
            .snapshot
            .accounts
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| CoreError::AccountNotFound(id.to_string()))?;
        self.dirty = true;
        Ok(self.snapshot.accounts.remove(idx))
    }

    // ── Write-back ──────────────────────────────────────────────────

    /// Serialize the session for the storage collaborator.
    pub fn to_session_json(&self) -> Result<String, CoreError> {
        SessionCodec::encode(&SessionData {
            investments: self.snapshot.clone(),
        })
    }

    /// Whether holdings or accounts changed since load or the last save.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag after a successful write-back.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    // ── Internal ────────────────────────────────────────────────────

    fn find_holding(&self, ticker: &str) -> Option<usize> {
        let upper = ticker.trim().to_uppercase();
        self.snapshot.holdings.iter().position(|h| h.ticker == upper)
    }

    fn holding_mut(&mut self, ticker: &str) -> Result<&mut Holding, CoreError> {
        let idx = self
            .find_holding(ticker)
            .ok_or_else(|| CoreError::HoldingNotFound(ticker.to_string()))?;
        Ok(&mut self.snapshot.holdings[idx])
    }

    fn resort(&mut self) {
        sort_by_value(&mut self.snapshot.holdings);
        self.dirty = true;
    }
}

fn validate_non_negative(field: &str, value: f64) -> Result<(), CoreError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CoreError::ValidationError(format!(
            "Holding {field} must be a non-negative number, got {value}"
        )))
    }
}
