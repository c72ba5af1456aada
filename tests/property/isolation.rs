use crate::common::{self, CHAIN_ID, CREATE_LISTING};
use alloy::dyn_abi::DynSolValue;
use alloy::primitives::U256;
use contract_verifier::inspector::Outcome;
use contract_verifier::network::MockLedger;
use contract_verifier::Verifier;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_each_probe_reflects_only_its_own_reply(
        debug_ok in any::<bool>(),
        count_ok in any::<bool>(),
        admin_ok in any::<bool>(),
    ) {
        let mut ledger = MockLedger::new(CHAIN_ID)
            .returns(CREATE_LISTING, common::listing_response(true, 200, ""));
        if debug_ok {
            ledger = ledger.returns("debugMode()", vec![DynSolValue::Bool(true)]);
        }
        if count_ok {
            ledger = ledger.returns("listingCount()", vec![DynSolValue::Uint(U256::from(1), 256)]);
        }
        if admin_ok {
            ledger = ledger.returns("admin()", vec![DynSolValue::Address(common::admin())]);
        }

        let report = Verifier::new(common::settings()).run_with(&ledger);
        let expect = |ok: bool| if ok { Outcome::Success } else { Outcome::Failure };

        prop_assert_eq!(report.probes.len(), 3);
        prop_assert_eq!(report.probes[0].outcome, expect(debug_ok));
        prop_assert_eq!(report.probes[1].outcome, expect(count_ok));
        prop_assert_eq!(report.probes[2].outcome, expect(admin_ok));

        // the simulation runs exactly when the admin was read
        prop_assert_eq!(report.simulation.is_some(), admin_ok);
        prop_assert_eq!(report.passed(), admin_ok);
    }
}
