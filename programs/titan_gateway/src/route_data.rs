// SPDX-License-Identifier: MIT
//! Fixed-offset decoding of Titan `swap_route_v2` instruction data.
//!
//! The buffer is owned by Titan and forwarded verbatim; only the fixed
//! 33-byte head is decoded here, the variable route tail stays opaque.

use anchor_lang::prelude::*;

use crate::GatewayError;

/// Anchor-style discriminator of Titan's `swap_route_v2` instruction.
pub const SWAP_ROUTE_V2_DISCRIMINATOR: [u8; 8] = [249, 91, 84, 33, 69, 22, 0, 135];

/// Length of the fixed head: [8 discriminator][8 amount][8 minimum_amount_out]
/// [1 mint_count][2 provider_fee_bps][2 service_fee_bps][4 swap_leg_count].
pub const ROUTE_PREFIX_LEN: usize = 33;

const AMOUNT_OFFSET: usize = 8;
const MIN_OUT_OFFSET: usize = 16;
const MINT_COUNT_OFFSET: usize = 24;
const PROVIDER_FEE_OFFSET: usize = 25;
const SERVICE_FEE_OFFSET: usize = 27;
const SWAP_LEG_COUNT_OFFSET: usize = 29;

/// Decoded fixed head of a `swap_route_v2` buffer. All integers little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutePrefix {
    pub amount: u64,
    pub minimum_amount_out: u64,
    pub mint_count: u8,
    pub provider_fee_bps: u16,
    pub service_fee_bps: u16,
    pub swap_leg_count: u32,
}

/// Decode the fixed head of `data`.
///
/// A buffer shorter than the head or carrying any other discriminator is not
/// a `swap_route_v2` call at all and is rejected as invalid instruction data
/// before anything else is read.
pub fn parse_route_prefix(data: &[u8]) -> Result<RoutePrefix> {
    if data.len() < ROUTE_PREFIX_LEN {
        return Err(ProgramError::InvalidInstructionData.into());
    }
    if data[..SWAP_ROUTE_V2_DISCRIMINATOR.len()] != SWAP_ROUTE_V2_DISCRIMINATOR {
        return Err(ProgramError::InvalidInstructionData.into());
    }
    Ok(RoutePrefix {
        amount: le_u64(data, AMOUNT_OFFSET),
        minimum_amount_out: le_u64(data, MIN_OUT_OFFSET),
        mint_count: data[MINT_COUNT_OFFSET],
        provider_fee_bps: le_u16(data, PROVIDER_FEE_OFFSET),
        service_fee_bps: le_u16(data, SERVICE_FEE_OFFSET),
        swap_leg_count: le_u32(data, SWAP_LEG_COUNT_OFFSET),
    })
}

/// Require that the amounts embedded in the route data equal the amounts the
/// caller declared as typed arguments. Both divergences report the same
/// error code: the shape is right, the content is inconsistent.
pub fn require_declared_amounts(
    prefix: &RoutePrefix,
    amount: u64,
    minimum_amount_out: u64,
) -> Result<()> {
    require_eq!(
        prefix.amount,
        amount,
        GatewayError::DeclaredParameterMismatch
    );
    require_eq!(
        prefix.minimum_amount_out,
        minimum_amount_out,
        GatewayError::DeclaredParameterMismatch
    );
    Ok(())
}

fn le_u64(data: &[u8], at: usize) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&data[at..at + 8]);
    u64::from_le_bytes(raw)
}

fn le_u32(data: &[u8], at: usize) -> u32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&data[at..at + 4]);
    u32::from_le_bytes(raw)
}

fn le_u16(data: &[u8], at: usize) -> u16 {
    let mut raw = [0u8; 2];
    raw.copy_from_slice(&data[at..at + 2]);
    u16::from_le_bytes(raw)
}
