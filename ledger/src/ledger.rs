//! Balance-affecting operations
//!
//! Every mutation is one conditional update of the user record: the business
//! check and the write succeed together or not at all.

use crate::error::{LedgerError, Result};
use crate::outcome::{OpenOutcome, Profile, ScanOutcome, SaleOutcome};
use crate::pricing::EconomyConfig;
use chrono::Utc;
use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use reforge_core::selector::{self, INVENTORY_FLOAT_PRECISION};
use reforge_core::{Amount, Drop, DrawMode, InventoryEntry, PendingReservation, User};
use reforge_storage::{CaseContents, Database};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub struct Ledger<R = ChaCha20Rng> {
    pub(crate) db: Arc<Database>,
    pub(crate) config: EconomyConfig,
    pub(crate) rng: Mutex<R>,
}

impl Ledger<ChaCha20Rng> {
    /// Ledger with an RNG seeded from the thread-local generator
    pub fn new(db: Arc<Database>, config: EconomyConfig) -> Self {
        let rng = ChaCha20Rng::from_rng(&mut rand::rng());
        Self::with_rng(db, config, rng)
    }

    /// Reproducible draws, for tests and replay
    pub fn seeded(db: Arc<Database>, config: EconomyConfig, seed: u64) -> Self {
        Self::with_rng(db, config, ChaCha20Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Ledger<R> {
    pub fn with_rng(db: Arc<Database>, config: EconomyConfig, rng: R) -> Self {
        Self {
            db,
            config,
            rng: Mutex::new(rng),
        }
    }

    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    // Users

    /// Create or refresh a user.
    ///
    /// Missing usernames default to `Player_` plus the last five digits of the
    /// steam id.
    pub fn login(
        &self,
        steam_id: &str,
        username: Option<&str>,
        avatar: Option<&str>,
    ) -> Result<Profile> {
        let steam_id = steam_id.trim();
        if steam_id.is_empty() {
            return Err(LedgerError::InvalidInput("steam_id is required".to_string()));
        }

        let username = match username.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => default_username(steam_id),
        };

        let (user, created) = self.db.login_user(
            steam_id,
            &username,
            avatar.unwrap_or_default(),
            self.config.starting_balance,
        )?;

        if created {
            info!(steam_id, balance = %user.balance, "user created");
        } else {
            debug!(steam_id, "user logged in");
        }
        Ok(Profile::from(&user))
    }

    /// Session teardown: drops any pending reservation
    pub fn logout(&self, steam_id: &str) -> Result<()> {
        if self.discard_reservation(steam_id)? {
            info!(steam_id, "reservation cleared on logout");
        }
        Ok(())
    }

    pub fn profile(&self, steam_id: &str) -> Result<Profile> {
        Ok(Profile::from(&self.user(steam_id)?))
    }

    pub(crate) fn user(&self, steam_id: &str) -> Result<User> {
        self.db
            .get_user(steam_id)?
            .ok_or_else(|| LedgerError::UserNotFound(steam_id.to_string()))
    }

    /// Conditional update that maps a missing record to `UserNotFound`
    pub(crate) fn update<T, F>(&self, steam_id: &str, mutate: F) -> Result<(User, T)>
    where
        F: FnMut(&mut User) -> Result<T>,
    {
        self.db
            .update_user(steam_id, mutate)?
            .ok_or_else(|| LedgerError::UserNotFound(steam_id.to_string()))
    }

    // Balance

    pub fn debit(&self, steam_id: &str, amount: Amount) -> Result<Amount> {
        let (_, balance) = self.update(steam_id, |user| Ok(user.debit(amount)?))?;
        Ok(balance)
    }

    pub fn credit(&self, steam_id: &str, amount: Amount) -> Result<Amount> {
        let (_, balance) = self.update(steam_id, |user| Ok(user.credit(amount)?))?;
        Ok(balance)
    }

    pub fn add_funds(&self, steam_id: &str, amount: Amount) -> Result<Amount> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidInput(
                "amount must be positive".to_string(),
            ));
        }
        let balance = self.credit(steam_id, amount)?;
        info!(steam_id, amount = %amount, balance = %balance, "funds added");
        Ok(balance)
    }

    // Cases

    /// Buy a case and add the drawn item to the inventory
    pub fn open_case(&self, steam_id: &str, case_id: &str) -> Result<OpenOutcome> {
        let contents = self.case_contents(case_id)?;
        let price = contents.case.price;

        // Fail before drawing so a broke user never consumes randomness
        self.user(steam_id)?.ensure_funds(price)?;

        let drop = self.draw(&contents, DrawMode::Auto)?;
        let entry = InventoryEntry::new(drop.item.id.clone(), drop.float, Utc::now());
        let entry_id = entry.id;

        let (_, new_balance) = self.update(steam_id, |user| {
            let balance = user.debit(price)?;
            user.append_item(entry.clone());
            user.cases_opened += 1;
            Ok(balance)
        })?;

        info!(
            steam_id,
            case_id,
            item_id = %drop.item.id,
            float = drop.float,
            balance = %new_balance,
            "case opened"
        );

        Ok(OpenOutcome {
            entry_id,
            item: drop.item,
            float: drop.float,
            new_balance,
        })
    }

    /// Pay the scan fee and reserve the drawn item without granting it
    pub fn scan_case(&self, steam_id: &str, case_id: &str) -> Result<ScanOutcome> {
        let contents = self.case_contents(case_id)?;
        let scan_fee = self.config.scan_fee(contents.case.price);

        self.user(steam_id)?.ensure_funds(scan_fee)?;

        let drop = self.draw(&contents, DrawMode::Rarity)?;
        let reservation = PendingReservation {
            case_id: contents.case.id.clone(),
            item_id: drop.item.id.clone(),
            float: drop.float,
            scanned_at: Utc::now(),
        };

        let (_, (new_balance, replaced)) = self.update(steam_id, |user| {
            let balance = user.debit(scan_fee)?;
            let replaced = user.reserve(reservation.clone());
            Ok((balance, replaced))
        })?;

        if let Some(previous) = replaced {
            debug!(steam_id, case_id = %previous.case_id, "unclaimed reservation replaced");
        }
        info!(
            steam_id,
            case_id,
            item_id = %drop.item.id,
            fee = %scan_fee,
            balance = %new_balance,
            "case scanned"
        );

        Ok(ScanOutcome {
            item: drop.item,
            float: drop.float,
            scan_fee,
            new_balance,
        })
    }

    /// Buy the case at full price and receive the reserved item
    pub fn claim_reservation(&self, steam_id: &str, case_id: &str) -> Result<OpenOutcome> {
        self.user(steam_id)?.reservation_for(case_id)?;
        let case = self
            .db
            .get_case(case_id)?
            .ok_or_else(|| LedgerError::CaseNotFound(case_id.to_string()))?;

        // A rescan racing this claim is re-checked on every attempt: another
        // case yields CaseMismatch, the same case grants the newer roll.
        let (_, (entry_id, item, float, new_balance)) = self.update(steam_id, |user| {
            let reserved = user.reservation_for(case_id)?.clone();
            let item = self
                .db
                .get_item(&reserved.item_id)?
                .ok_or_else(|| LedgerError::SkinNotFound(reserved.item_id.clone()))?;
            let balance = user.debit(case.price)?;
            let entry_id = user
                .append_item(InventoryEntry::new(
                    reserved.item_id.clone(),
                    reserved.float,
                    Utc::now(),
                ))
                .id;
            user.cases_opened += 1;
            user.discard_reservation();
            Ok((entry_id, item, reserved.float, balance))
        })?;

        info!(
            steam_id,
            case_id,
            item_id = %item.id,
            balance = %new_balance,
            "reservation claimed"
        );

        Ok(OpenOutcome {
            entry_id,
            item,
            float,
            new_balance,
        })
    }

    /// Drop the pending reservation. Returns whether one existed.
    pub fn discard_reservation(&self, steam_id: &str) -> Result<bool> {
        let (_, discarded) = self.update(steam_id, |user| Ok(user.discard_reservation().is_some()))?;
        if discarded {
            debug!(steam_id, "reservation discarded");
        }
        Ok(discarded)
    }

    // Selling

    pub fn sell_item(&self, steam_id: &str, entry_id: Uuid) -> Result<SaleOutcome> {
        let user = self.user(steam_id)?;
        let entry = user
            .find_item(entry_id)
            .ok_or_else(|| LedgerError::ItemNotFound(entry_id.to_string()))?;
        let item = self
            .db
            .get_item(&entry.item_id)?
            .ok_or_else(|| LedgerError::SkinNotFound(entry.item_id.clone()))?;
        let sold_for = self.config.sell_price(item.price);

        let (_, new_balance) = self.update(steam_id, |user| {
            user.remove_item(entry_id)?;
            Ok(user.credit(sold_for)?)
        })?;

        info!(
            steam_id,
            %entry_id,
            item_id = %item.id,
            sold_for = %sold_for,
            balance = %new_balance,
            "item sold"
        );

        Ok(SaleOutcome {
            entry_id,
            sold_for,
            new_balance,
        })
    }

    // Drawing

    pub(crate) fn case_contents(&self, case_id: &str) -> Result<CaseContents> {
        self.db
            .case_contents(case_id)?
            .ok_or_else(|| LedgerError::CaseNotFound(case_id.to_string()))
    }

    fn draw(&self, contents: &CaseContents, mode: DrawMode) -> Result<Drop> {
        // Whole-catalog fallback only matters for a case with no items
        let catalog = if contents.items.is_empty() {
            warn!(case_id = %contents.case.id, "case has no items, drawing from catalog");
            self.db.all_items()?
        } else {
            Vec::new()
        };

        let entries = contents.entries();
        let drop = {
            let mut rng = self.rng.lock();
            selector::resolve(
                &entries,
                &catalog,
                mode,
                INVENTORY_FLOAT_PRECISION,
                &mut *rng,
            )?
        };

        debug!(
            case_id = %contents.case.id,
            ?mode,
            item_id = %drop.item.id,
            float = drop.float,
            "drew item"
        );
        Ok(drop)
    }
}

fn default_username(steam_id: &str) -> String {
    let chars: Vec<char> = steam_id.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(5)..].iter().collect();
    format!("Player_{}", tail)
}
