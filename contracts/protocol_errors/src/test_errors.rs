#[cfg(test)]
mod tests {
    extern crate std;
    use crate::{ContractError, ErrorCategory, ErrorExt};
    use std::collections::BTreeSet;
    use std::vec::Vec;

    fn all_variants() -> Vec<ContractError> {
        std::vec![
            ContractError::NotInitialized,
            ContractError::AlreadyInitialized,
            ContractError::Unauthorized,
            ContractError::DepositorNotApproved,
            ContractError::DepositsLocked,
            ContractError::SlippageExceeded,
            ContractError::MaxPayoutExceeded,
            ContractError::MaxDebtExceeded,
            ContractError::NoActiveBond,
            ContractError::BondTooSmall,
            ContractError::InvalidTerms,
            ContractError::InvalidAdjustment,
            ContractError::StillWarming,
            ContractError::RebaseTooEarly,
            ContractError::NoWarmupDeposit,
            ContractError::InsufficientStake,
            ContractError::IndexDiscontinuity,
            ContractError::InvalidSnapshot,
            ContractError::ContractNotSet,
            ContractError::InvalidAmount,
            ContractError::QueueNotElapsed,
            ContractError::FloorNotSet,
            ContractError::InsufficientReserves,
            ContractError::RecipientNotFound,
            ContractError::RecipientExists,
            ContractError::InvalidRate,
            ContractError::Overflow,
            ContractError::Underflow,
            ContractError::DivisionByZero,
        ]
    }

    // --- Wire code tests ---

    #[test]
    fn test_codes_initialization() {
        assert_eq!(ContractError::NotInitialized as u32, 1);
        assert_eq!(ContractError::AlreadyInitialized as u32, 2);
    }

    #[test]
    fn test_codes_authorization() {
        assert_eq!(ContractError::Unauthorized as u32, 100);
        assert_eq!(ContractError::DepositorNotApproved as u32, 101);
        assert_eq!(ContractError::DepositsLocked as u32, 102);
    }

    #[test]
    fn test_codes_bond() {
        assert_eq!(ContractError::SlippageExceeded as u32, 200);
        assert_eq!(ContractError::MaxPayoutExceeded as u32, 201);
        assert_eq!(ContractError::MaxDebtExceeded as u32, 202);
        assert_eq!(ContractError::NoActiveBond as u32, 203);
        assert_eq!(ContractError::BondTooSmall as u32, 204);
        assert_eq!(ContractError::InvalidTerms as u32, 205);
        assert_eq!(ContractError::InvalidAdjustment as u32, 206);
    }

    #[test]
    fn test_codes_staking() {
        assert_eq!(ContractError::StillWarming as u32, 300);
        assert_eq!(ContractError::RebaseTooEarly as u32, 301);
        assert_eq!(ContractError::NoWarmupDeposit as u32, 302);
        assert_eq!(ContractError::InsufficientStake as u32, 303);
        assert_eq!(ContractError::IndexDiscontinuity as u32, 304);
        assert_eq!(ContractError::InvalidSnapshot as u32, 305);
        assert_eq!(ContractError::ContractNotSet as u32, 306);
    }

    #[test]
    fn test_codes_treasury_and_distributor() {
        assert_eq!(ContractError::InvalidAmount as u32, 400);
        assert_eq!(ContractError::QueueNotElapsed as u32, 401);
        assert_eq!(ContractError::FloorNotSet as u32, 402);
        assert_eq!(ContractError::InsufficientReserves as u32, 403);
        assert_eq!(ContractError::RecipientNotFound as u32, 500);
        assert_eq!(ContractError::RecipientExists as u32, 501);
        assert_eq!(ContractError::InvalidRate as u32, 502);
    }

    #[test]
    fn test_codes_arithmetic() {
        assert_eq!(ContractError::Overflow as u32, 700);
        assert_eq!(ContractError::Underflow as u32, 701);
        assert_eq!(ContractError::DivisionByZero as u32, 702);
    }

    #[test]
    fn test_codes_are_unique() {
        let codes: BTreeSet<u32> = all_variants().iter().map(|e| *e as u32).collect();
        assert_eq!(codes.len(), all_variants().len());
    }

    // --- Category tests ---

    #[test]
    fn test_category_matches_code_block() {
        for err in all_variants() {
            let code = err as u32;
            let expected = match code {
                1..=99 => ErrorCategory::Initialization,
                100..=199 => ErrorCategory::Authorization,
                200..=299 => ErrorCategory::Bond,
                300..=399 => ErrorCategory::Staking,
                400..=499 => ErrorCategory::Treasury,
                500..=599 => ErrorCategory::Distributor,
                _ => ErrorCategory::Arithmetic,
            };
            assert_eq!(err.category(), expected, "code {code}");
        }
    }

    #[test]
    fn test_descriptions_non_empty_and_distinct() {
        let mut seen = BTreeSet::new();
        for err in all_variants() {
            let d = err.description();
            assert!(!d.is_empty());
            assert!(seen.insert(d), "duplicate description: {d}");
        }
    }

    #[test]
    fn test_equality() {
        assert_eq!(ContractError::NoActiveBond, ContractError::NoActiveBond);
        assert_ne!(ContractError::NoActiveBond, ContractError::StillWarming);
    }

    // --- Result integration (mirrors call sites) ---

    fn mock_slippage(price: i128, max_price: i128) -> Result<i128, ContractError> {
        if price > max_price {
            return Err(ContractError::SlippageExceeded);
        }
        Ok(price)
    }

    fn mock_claim(epoch: u32, expiry: u32) -> Result<(), ContractError> {
        if epoch < expiry {
            return Err(ContractError::StillWarming);
        }
        Ok(())
    }

    fn mock_checked_mul(a: i128, b: i128) -> Result<i128, ContractError> {
        a.checked_mul(b).ok_or(ContractError::Overflow)
    }

    fn mock_pipeline(price: i128, max_price: i128, qty: i128) -> Result<i128, ContractError> {
        let p = mock_slippage(price, max_price)?;
        mock_checked_mul(p, qty)
    }

    #[test]
    fn test_slippage() {
        assert_eq!(mock_slippage(11, 10), Err(ContractError::SlippageExceeded));
        assert_eq!(mock_slippage(10, 10), Ok(10));
    }

    #[test]
    fn test_still_warming() {
        assert_eq!(mock_claim(4, 5), Err(ContractError::StillWarming));
        assert!(mock_claim(5, 5).is_ok());
    }

    #[test]
    fn test_question_mark_propagation() {
        assert_eq!(mock_pipeline(11, 10, 2), Err(ContractError::SlippageExceeded));
        assert_eq!(mock_pipeline(10, 10, i128::MAX), Err(ContractError::Overflow));
        assert_eq!(mock_pipeline(10, 10, 3), Ok(30));
    }
}
