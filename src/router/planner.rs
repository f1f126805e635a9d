// Command planner
// Accumulates batch-executor commands in execution order and renders the
// opcode string, the parallel input list, and the execute() calldata
//
// Numan Thabit 2025 Nov

use alloy::primitives::{Bytes, U256};
use alloy::sol_types::{SolCall, SolValue};
use serde::Serialize;

use crate::abi::{
    SweepParams, UniversalRouter, UniversalRouterDeadline, UnwrapNativeParams,
    V2SwapExactInParams, V2SwapExactOutParams, V3SwapExactInParams, V3SwapExactOutParams,
    WrapNativeParams,
};

/// "Use whatever the router currently holds" (2^255).
pub const CONTRACT_BALANCE: U256 = U256::from_limbs([0, 0, 0, 0x8000_0000_0000_0000]);

/// Batch-executor opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum CommandType {
    V3SwapExactIn = 0x00,
    V3SwapExactOut = 0x01,
    Sweep = 0x04,
    V2SwapExactIn = 0x08,
    V2SwapExactOut = 0x09,
    WrapNative = 0x0b,
    UnwrapNative = 0x0c,
}

impl CommandType {
    pub fn opcode(self) -> u8 {
        self as u8
    }
}

/// Parameter payload for each opcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParams {
    V3SwapExactIn(V3SwapExactInParams),
    V3SwapExactOut(V3SwapExactOutParams),
    Sweep(SweepParams),
    V2SwapExactIn(V2SwapExactInParams),
    V2SwapExactOut(V2SwapExactOutParams),
    WrapNative(WrapNativeParams),
    UnwrapNative(UnwrapNativeParams),
}

impl CommandParams {
    pub fn command_type(&self) -> CommandType {
        match self {
            CommandParams::V3SwapExactIn(_) => CommandType::V3SwapExactIn,
            CommandParams::V3SwapExactOut(_) => CommandType::V3SwapExactOut,
            CommandParams::Sweep(_) => CommandType::Sweep,
            CommandParams::V2SwapExactIn(_) => CommandType::V2SwapExactIn,
            CommandParams::V2SwapExactOut(_) => CommandType::V2SwapExactOut,
            CommandParams::WrapNative(_) => CommandType::WrapNative,
            CommandParams::UnwrapNative(_) => CommandType::UnwrapNative,
        }
    }

    /// ABI-encode as a flat parameter tuple, the layout the executor decodes.
    pub fn encode(&self) -> Bytes {
        let raw = match self {
            CommandParams::V3SwapExactIn(p) => p.abi_encode_params(),
            CommandParams::V3SwapExactOut(p) => p.abi_encode_params(),
            CommandParams::Sweep(p) => p.abi_encode_params(),
            CommandParams::V2SwapExactIn(p) => p.abi_encode_params(),
            CommandParams::V2SwapExactOut(p) => p.abi_encode_params(),
            CommandParams::WrapNative(p) => p.abi_encode_params(),
            CommandParams::UnwrapNative(p) => p.abi_encode_params(),
        };
        Bytes::from(raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub command_type: CommandType,
    pub input: Bytes,
}

/// Ordered command list. Opcodes and inputs are derived from the same vector,
/// so they can never drift apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutePlanner {
    commands: Vec<Command>,
}

impl RoutePlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, params: CommandParams) -> &mut Self {
        self.commands.push(Command {
            command_type: params.command_type(),
            input: params.encode(),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn command_types(&self) -> Vec<CommandType> {
        self.commands.iter().map(|c| c.command_type).collect()
    }

    /// One opcode byte per command.
    pub fn commands(&self) -> Bytes {
        self.commands
            .iter()
            .map(|c| c.command_type.opcode())
            .collect::<Vec<u8>>()
            .into()
    }

    pub fn inputs(&self) -> Vec<Bytes> {
        self.commands.iter().map(|c| c.input.clone()).collect()
    }

    /// Calldata for `execute(bytes,bytes[])`.
    pub fn execute_calldata(&self) -> Bytes {
        UniversalRouter::executeCall {
            commands: self.commands(),
            inputs: self.inputs(),
        }
        .abi_encode()
        .into()
    }

    /// Calldata for `execute(bytes,bytes[],uint256)`; reverts on-chain after `deadline`.
    pub fn execute_calldata_with_deadline(&self, deadline: U256) -> Bytes {
        UniversalRouterDeadline::executeCall {
            commands: self.commands(),
            inputs: self.inputs(),
            deadline,
        }
        .abi_encode()
        .into()
    }
}
