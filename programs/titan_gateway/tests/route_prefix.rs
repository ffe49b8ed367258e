use anchor_lang::error::{Error, ERROR_CODE_OFFSET};
use anchor_lang::prelude::ProgramError;
use titan_gateway::route_data::{
    parse_route_prefix, require_declared_amounts, RoutePrefix, ROUTE_PREFIX_LEN,
    SWAP_ROUTE_V2_DISCRIMINATOR,
};
use titan_gateway::GatewayError;

// Mirrors the buffers Titan clients submit: fixed head, two-mint route, no
// fees, empty leg list.
fn build_route_data(amount: u64, minimum_amount_out: u64, discriminator: [u8; 8]) -> Vec<u8> {
    let mut data = Vec::with_capacity(ROUTE_PREFIX_LEN);
    data.extend_from_slice(&discriminator);
    data.extend_from_slice(&amount.to_le_bytes());
    data.extend_from_slice(&minimum_amount_out.to_le_bytes());
    data.push(2);
    data.extend_from_slice(&0u16.to_le_bytes());
    data.extend_from_slice(&0u16.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    data
}

fn custom_code(err: Error) -> Option<u32> {
    match err {
        Error::AnchorError(e) => Some(e.error_code_number),
        Error::ProgramError(_) => None,
    }
}

fn assert_invalid_instruction_data(err: Error) {
    match err {
        Error::ProgramError(pe) => {
            assert_eq!(pe.program_error, ProgramError::InvalidInstructionData)
        }
        other => panic!("expected InvalidInstructionData, got {:?}", other),
    }
}

#[test]
fn observed_fixture_parses() {
    let data = build_route_data(1_000_000, 900_000, SWAP_ROUTE_V2_DISCRIMINATOR);
    assert_eq!(data.len(), ROUTE_PREFIX_LEN);
    let prefix = parse_route_prefix(&data).unwrap();
    assert_eq!(
        prefix,
        RoutePrefix {
            amount: 1_000_000,
            minimum_amount_out: 900_000,
            mint_count: 2,
            provider_fee_bps: 0,
            service_fee_bps: 0,
            swap_leg_count: 0,
        }
    );
    assert!(require_declared_amounts(&prefix, 1_000_000, 900_000).is_ok());
}

#[test]
fn zeroed_discriminator_is_invalid_instruction_data() {
    let data = build_route_data(1_000_000, 900_000, [0u8; 8]);
    assert_invalid_instruction_data(parse_route_prefix(&data).unwrap_err());
}

#[test]
fn every_truncation_is_invalid_instruction_data() {
    let data = build_route_data(1_000_000, 900_000, SWAP_ROUTE_V2_DISCRIMINATOR);
    for len in 0..ROUTE_PREFIX_LEN {
        assert_invalid_instruction_data(parse_route_prefix(&data[..len]).unwrap_err());
    }
}

#[test]
fn amount_divergence_reports_mismatch_code() {
    let prefix =
        parse_route_prefix(&build_route_data(1_000_000, 900_000, SWAP_ROUTE_V2_DISCRIMINATOR))
            .unwrap();
    let err = require_declared_amounts(&prefix, 2_000_000, 900_000).unwrap_err();
    assert_eq!(
        custom_code(err),
        Some(ERROR_CODE_OFFSET + GatewayError::DeclaredParameterMismatch as u32)
    );
}

#[test]
fn min_out_divergence_reports_the_same_code_as_amount_divergence() {
    let prefix =
        parse_route_prefix(&build_route_data(1_000_000, 900_000, SWAP_ROUTE_V2_DISCRIMINATOR))
            .unwrap();
    let amount_err = require_declared_amounts(&prefix, 2_000_000, 900_000).unwrap_err();
    let min_out_err = require_declared_amounts(&prefix, 1_000_000, 800_000).unwrap_err();
    // Both checks are logically distinct but collapse into one reported code.
    assert_eq!(custom_code(amount_err), custom_code(min_out_err));
}

#[test]
fn verdict_is_stable_across_repeated_validation() {
    let data = build_route_data(7_777, 7_000, SWAP_ROUTE_V2_DISCRIMINATOR);
    for _ in 0..4 {
        let prefix = parse_route_prefix(&data).unwrap();
        assert!(require_declared_amounts(&prefix, 7_777, 7_000).is_ok());
        assert!(require_declared_amounts(&prefix, 7_778, 7_000).is_err());
    }
}
