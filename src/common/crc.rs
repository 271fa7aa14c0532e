// src/common/crc.rs

use super::error::OneWireError;
use crc::{Algorithm, Crc};

/// Dallas/Maxim 1-Wire CRC-8 (CRC-8/MAXIM-DOW).
/// Polynomial: 0x31 (x^8 + x^5 + x^4 + 1), processed LSB first
/// Initial Value: 0x00
/// Input Reflected: true
/// Output Reflected: true
/// Final XOR: 0x00
/// Check Value: 0xA1 (for "123456789")
/// Residue: 0x00
pub const ONEWIRE_CRC: Algorithm<u8> = Algorithm {
    width: 8,
    poly: 0x31,
    init: 0x00,
    refin: true,
    refout: true,
    xorout: 0x00,
    check: 0xA1,
    residue: 0x00,
};

// Create a Crc instance for the 1-Wire algorithm for reuse.
const CRC_COMPUTER: Crc<u8> = Crc::<u8>::new(&ONEWIRE_CRC);

/// Calculates the 1-Wire CRC-8 over `data`.
///
/// ROM codes and scratchpads carry this CRC in their last byte, computed
/// over every byte before it.
#[inline]
pub fn calculate_crc8(data: &[u8]) -> u8 {
    CRC_COMPUTER.checksum(data)
}

/// Verifies a block whose final byte is the CRC-8 of the preceding bytes.
///
/// # Returns
///
/// * `Ok(())` if the CRC is valid.
/// * `Err(OneWireError::InvalidResponse)` if the block is empty.
/// * `Err(OneWireError::CrcMismatch)` if the CRCs don't match.
pub fn verify_crc8<E>(block_with_crc: &[u8]) -> Result<(), OneWireError<E>>
where
    E: core::fmt::Debug,
{
    let (received_crc, data_part) = block_with_crc
        .split_last()
        .ok_or(OneWireError::InvalidResponse)?;

    let calculated_crc = calculate_crc8(data_part);
    if calculated_crc == *received_crc {
        Ok(())
    } else {
        Err(OneWireError::CrcMismatch { expected: *received_crc, calculated: calculated_crc })
    }
}
