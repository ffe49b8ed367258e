// SPDX-License-Identifier: MIT
#![allow(unexpected_cfgs)]
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
use anchor_lang::prelude::*;
use anchor_lang::solana_program::{instruction::Instruction, program::invoke_signed};
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

pub mod route_data;

use route_data::{parse_route_prefix, require_declared_amounts};

declare_id!("8Faz99YdaCqSR4SK2nNs5PCpLShpwzScqA9BJTAAJKTj");

/// Titan routing program the gateway forwards into.
pub const TITAN_PROGRAM_ID: Pubkey = pubkey!("T1TANpTeScyeqVzzgNViGDNrkQ6qHz9KrSBS4aNXvGT");

/// Seed of the PDA that owns the swap vaults and signs the Titan CPI.
pub const PROTOCOL_AUTHORITY_SEED: &[u8] = b"protocol_authority";

#[program]
pub mod titan_gateway {
    use super::*;

    /// Validate `swap_data` against the declared amounts, then forward it
    /// unmodified to Titan's `swap_route_v2`. The buffer is untrusted caller
    /// input; `amount` and `minimum_amount_out` are the values this program's
    /// caller committed to, and the two must agree byte-for-byte before any
    /// CPI is dispatched.
    pub fn swap<'info>(
        ctx: Context<'_, '_, '_, 'info, Swap<'info>>,
        swap_data: Vec<u8>,
        amount: u64,
        minimum_amount_out: u64,
    ) -> Result<()> {
        let prefix = parse_route_prefix(&swap_data)?;
        require_declared_amounts(&prefix, amount, minimum_amount_out)?;

        forward_route_to_titan(
            ctx.accounts,
            &swap_data,
            ctx.remaining_accounts,
            ctx.bumps.protocol_authority,
        )?;

        emit!(SwapForwarded {
            payer: ctx.accounts.payer.key(),
            input_mint: ctx.accounts.input_mint.key(),
            output_mint: ctx.accounts.output_mint.key(),
            amount,
            minimum_amount_out,
            swap_leg_count: prefix.swap_leg_count,
        });
        Ok(())
    }
}

#[derive(Accounts)]
pub struct Swap<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,
    #[account(
        mut,
        seeds = [PROTOCOL_AUTHORITY_SEED],
        bump
    )]
    pub protocol_authority: SystemAccount<'info>,
    pub input_mint: Account<'info, Mint>,
    #[account(
        mut,
        associated_token::mint = input_mint,
        associated_token::authority = protocol_authority
    )]
    pub input_vault: Account<'info, TokenAccount>,
    pub output_mint: Account<'info, Mint>,
    #[account(
        init_if_needed,
        payer = payer,
        associated_token::mint = output_mint,
        associated_token::authority = protocol_authority,
    )]
    pub output_vault: Account<'info, TokenAccount>,
    /// CHECK: Titan's routing-state PDA; owned and validated by Titan itself
    pub atlas: UncheckedAccount<'info>,
    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    #[account(address = TITAN_PROGRAM_ID)]
    /// CHECK: pinned to the Titan program id by the address constraint
    pub titan_program: UncheckedAccount<'info>,
}

/// Issue the single `swap_route_v2` CPI with the caller's bytes untouched.
///
/// Titan re-derives the whole route from this buffer, so the gateway must
/// never re-encode it: the fixed account head below is payer, atlas,
/// input_mint, input_token_account, output_mint, output_token_account,
/// input_token_program, output_token_program, and the per-hop accounts
/// arrive through `remaining` with their writability preserved.
fn forward_route_to_titan<'info>(
    accounts: &Swap<'info>,
    swap_data: &[u8],
    remaining: &[AccountInfo<'info>],
    authority_bump: u8,
) -> Result<()> {
    let mut metas = vec![
        AccountMeta::new(accounts.protocol_authority.key(), true),
        AccountMeta::new_readonly(accounts.atlas.key(), false),
        AccountMeta::new_readonly(accounts.input_mint.key(), false),
        AccountMeta::new(accounts.input_vault.key(), false),
        AccountMeta::new_readonly(accounts.output_mint.key(), false),
        AccountMeta::new(accounts.output_vault.key(), false),
        AccountMeta::new_readonly(accounts.token_program.key(), false),
        AccountMeta::new_readonly(accounts.token_program.key(), false),
    ];
    metas.extend(remaining.iter().map(|hop| AccountMeta {
        pubkey: *hop.key,
        is_signer: false,
        is_writable: hop.is_writable,
    }));

    let mut infos = vec![
        accounts.protocol_authority.to_account_info(),
        accounts.atlas.to_account_info(),
        accounts.input_mint.to_account_info(),
        accounts.input_vault.to_account_info(),
        accounts.output_mint.to_account_info(),
        accounts.output_vault.to_account_info(),
        accounts.token_program.to_account_info(),
        accounts.token_program.to_account_info(),
    ];
    infos.extend_from_slice(remaining);

    msg!("forwarding swap_route_v2 to Titan");
    let ix = Instruction {
        program_id: accounts.titan_program.key(),
        accounts: metas,
        data: swap_data.to_vec(),
    };
    invoke_signed(
        &ix,
        &infos,
        &[&[PROTOCOL_AUTHORITY_SEED, &[authority_bump]]],
    )?;
    Ok(())
}

#[event]
pub struct SwapForwarded {
    pub payer: Pubkey,
    pub input_mint: Pubkey,
    pub output_mint: Pubkey,
    pub amount: u64,
    pub minimum_amount_out: u64,
    pub swap_leg_count: u32,
}

#[error_code]
pub enum GatewayError {
    /// Shared code for both the amount and minimum-out divergence: either way
    /// the caller declared one value and embedded another.
    #[msg("Declared swap amounts do not match the route data")]
    DeclaredParameterMismatch,
}
