//! # Solana transfer messages
//!
//! Verification is paid with a single native transfer. The wallet provider
//! signs and submits the transaction; the client only builds the legacy
//! message it signs, with `solana-program`'s `system_instruction::transfer`
//! and `Message::new`, and hands it over in base58.

use solana_program::message::Message;
use solana_program::system_instruction;

pub use solana_program::hash::Hash as Blockhash;
pub use solana_program::native_token::LAMPORTS_PER_SOL;
pub use solana_program::pubkey::Pubkey;

use crate::error::{ApiError, Result};

/// Parse a base58 account address.
pub fn parse_pubkey(s: &str) -> Result<Pubkey> {
    s.parse()
        .map_err(|e| ApiError::Address(format!("{s}: {e}")))
}

/// Parse a base58 blockhash as returned by `getLatestBlockhash`.
pub fn parse_blockhash(s: &str) -> Result<Blockhash> {
    s.parse()
        .map_err(|e| ApiError::Address(format!("{s}: {e}")))
}

/// A one-instruction native transfer, ready to serialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferMessage {
    pub from: Pubkey,
    pub to: Pubkey,
    pub lamports: u64,
    pub recent_blockhash: Blockhash,
}

impl TransferMessage {
    /// The legacy message. `from` pays the fee and is the only signer.
    pub fn message(&self) -> Result<Message> {
        if self.from == self.to {
            return Err(ApiError::Address(
                "sender and recipient are the same account".into(),
            ));
        }
        let ix = system_instruction::transfer(&self.from, &self.to, self.lamports);
        let mut message = Message::new(&[ix], Some(&self.from));
        message.recent_blockhash = self.recent_blockhash;
        Ok(message)
    }

    pub fn serialize(&self) -> Result<Vec<u8>> {
        Ok(self.message()?.serialize())
    }

    /// The serialized message in base58, as wallet providers accept it.
    pub fn to_base58(&self) -> Result<String> {
        Ok(bs58::encode(self.serialize()?).into_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_parsing() {
        let key = parse_pubkey("11111111111111111111111111111111").unwrap();
        assert_eq!(key, solana_program::system_program::ID);

        assert!(matches!(parse_pubkey("abc"), Err(ApiError::Address(_))));
        assert!(matches!(parse_pubkey("0OIl"), Err(ApiError::Address(_))));
        let recipient = parse_pubkey("6ezxBgxZ2WGhLjE675XcMW1wobR7io7vED49yaieuunj").unwrap();
        assert_eq!(
            recipient.to_string(),
            "6ezxBgxZ2WGhLjE675XcMW1wobR7io7vED49yaieuunj"
        );
    }

    #[test]
    fn test_transfer_message_layout() {
        let msg = TransferMessage {
            from: Pubkey::new_from_array([1; 32]),
            to: Pubkey::new_from_array([2; 32]),
            lamports: 100_000_000,
            recent_blockhash: Blockhash::new_from_array([3; 32]),
        };
        let bytes = msg.serialize().unwrap();
        assert_eq!(bytes.len(), 150);
        // Writable signer, writable recipient, read-only program.
        assert_eq!(&bytes[..4], &[1, 0, 1, 3]);
        assert_eq!(&bytes[4..36], &[1; 32]);
        assert_eq!(&bytes[36..68], &[2; 32]);
        assert_eq!(&bytes[68..100], &[0; 32]);
        assert_eq!(&bytes[100..132], &[3; 32]);
        assert_eq!(
            &bytes[132..],
            &[
                1, // one instruction
                2, // system program index
                2, 0, 1, // accounts
                12, // data length
                2, 0, 0, 0, // transfer
                0x00, 0xe1, 0xf5, 0x05, 0, 0, 0, 0, // 100_000_000 lamports
            ]
        );
        assert_eq!(
            msg.to_base58().unwrap(),
            bs58::encode(&bytes).into_string()
        );
    }

    #[test]
    fn test_self_transfer_is_rejected() {
        let msg = TransferMessage {
            from: Pubkey::new_from_array([1; 32]),
            to: Pubkey::new_from_array([1; 32]),
            lamports: 1,
            recent_blockhash: Blockhash::default(),
        };
        assert!(msg.serialize().is_err());
    }
}
