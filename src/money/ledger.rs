use super::dto::{Hustle, Transaction, TransactionType};
use crate::error::{ApiError, Violations};

pub const INCOME_CATEGORY: &str = "Revenue";
pub const EXPENSE_CATEGORY: &str = "General";

pub fn default_category(kind: TransactionType) -> &'static str {
    match kind {
        TransactionType::Income => INCOME_CATEGORY,
        TransactionType::Expense => EXPENSE_CATEGORY,
    }
}

/// Fill in a missing or blank category from the transaction type.
pub fn categorize(tx: &mut Transaction) {
    let missing = tx
        .category
        .as_deref()
        .map_or(true, |c| c.trim().is_empty());
    if missing {
        tx.category = Some(default_category(tx.kind).to_string());
    }
}

/// Bind the transaction to the hustle its reference resolved to.
///
/// `found` is the user's hustle with the given `hustle_id` when one was sent,
/// else the one named exactly `hustle_name`. An id that resolved to nothing is
/// rejected and overrides the free-text name otherwise; names that match
/// nothing are kept as they are.
pub fn link_hustle(tx: &mut Transaction, found: Option<&Hustle>) -> Result<(), ApiError> {
    if tx.hustle_id.is_some() {
        let mut v = Violations::default();
        v.check(found.is_some(), "hustle_id", "no such hustle for this user");
        v.finish()?;
    }
    if let Some(hustle) = found {
        tx.hustle_id = Some(hustle.id);
        tx.hustle_name = Some(hustle.name.clone());
    }
    Ok(())
}

/// Name a transaction is resolved by when it carries no `hustle_id`.
pub fn lookup_name(tx: &Transaction) -> Option<&str> {
    tx.hustle_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
}

#[cfg(test)]
mod ledger_tests {
    use super::*;
    use crate::money::dto::HustleType;
    use uuid::Uuid;

    fn tx(kind: TransactionType, hustle_name: Option<&str>) -> Transaction {
        Transaction {
            user_id: "u1".into(),
            hustle_id: None,
            hustle_name: hustle_name.map(Into::into),
            amount: 10.0,
            kind,
            category: None,
            note: None,
            occurred_at: None,
        }
    }

    fn hustle(name: &str) -> Hustle {
        Hustle {
            id: Uuid::new_v4(),
            user_id: "u1".into(),
            name: name.into(),
            kind: HustleType::Gig,
        }
    }

    #[test]
    fn missing_category_follows_type() {
        let mut income = tx(TransactionType::Income, None);
        categorize(&mut income);
        assert_eq!(income.category.as_deref(), Some("Revenue"));

        let mut expense = tx(TransactionType::Expense, None);
        expense.category = Some("  ".into());
        categorize(&mut expense);
        assert_eq!(expense.category.as_deref(), Some("General"));
    }

    #[test]
    fn explicit_category_is_kept() {
        let mut t = tx(TransactionType::Expense, None);
        t.category = Some("Hosting".into());
        categorize(&mut t);
        assert_eq!(t.category.as_deref(), Some("Hosting"));
    }

    #[test]
    fn name_resolves_to_registered_hustle() {
        let etsy = hustle("Etsy");
        let mut t = tx(TransactionType::Income, Some(" Etsy "));
        assert_eq!(lookup_name(&t), Some("Etsy"));
        link_hustle(&mut t, Some(&etsy)).unwrap();
        assert_eq!(t.hustle_id, Some(etsy.id));
        assert_eq!(t.hustle_name.as_deref(), Some("Etsy"));
    }

    #[test]
    fn unregistered_name_stays_free_text() {
        let mut t = tx(TransactionType::Income, Some("Etsyy"));
        link_hustle(&mut t, None).unwrap();
        assert_eq!(t.hustle_id, None);
        assert_eq!(t.hustle_name.as_deref(), Some("Etsyy"));
    }

    #[test]
    fn blank_name_is_not_looked_up() {
        assert_eq!(lookup_name(&tx(TransactionType::Expense, Some("  "))), None);
        assert_eq!(lookup_name(&tx(TransactionType::Expense, None)), None);
    }

    #[test]
    fn id_overrides_name() {
        let tutoring = hustle("Tutoring");
        let mut t = tx(TransactionType::Income, Some("tutoring typo"));
        t.hustle_id = Some(tutoring.id);
        link_hustle(&mut t, Some(&tutoring)).unwrap();
        assert_eq!(t.hustle_name.as_deref(), Some("Tutoring"));
    }

    #[test]
    fn unresolved_id_is_rejected() {
        let mut t = tx(TransactionType::Income, None);
        t.hustle_id = Some(Uuid::new_v4());
        let err = link_hustle(&mut t, None).unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref f) if f[0].field == "hustle_id"));
    }
}
