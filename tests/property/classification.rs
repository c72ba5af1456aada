use alloy::primitives::{Address, Bytes, U256};
use contract_verifier::simulator::{
    Payload, SimulationError, SimulationOutcome, SimulationRequest, SimulationResponse, Verdict,
    SUCCESS_CODE,
};
use proptest::prelude::*;

fn request() -> SimulationRequest {
    SimulationRequest {
        function: "createListing".to_string(),
        args: vec![],
        sender: Address::ZERO,
    }
}

proptest! {
    #[test]
    fn test_code_alone_decides_verdict(success in any::<bool>(), code in 0u64..1000, message in "[a-zA-Z ]{0,24}") {
        let response = SimulationResponse {
            success,
            code: U256::from(code),
            message,
            payload: Payload::Bytes(Bytes::new()),
        };
        let outcome = SimulationOutcome::classify(request(), Ok(response));

        prop_assert_eq!(outcome.passed(), U256::from(code) == SUCCESS_CODE);
        prop_assert_eq!(outcome.flag_disagrees(), success != (code == 200));
    }

    #[test]
    fn test_revert_never_passes(reason in "\\PC{0,40}") {
        let outcome = SimulationOutcome::classify(
            request(),
            Err(SimulationError::Revert { reason, data: None }),
        );
        prop_assert!(!outcome.passed());
        prop_assert!(outcome.response.is_none());
        let failed = matches!(outcome.verdict, Verdict::Failed(_));
        prop_assert!(failed);
    }
}
