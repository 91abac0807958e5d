//! User-facing text for the verification payment.

pub const NO_PROVIDER: &str = "Phantom Wallet not found. Please install it first.";
pub const SUBMITTED: &str = "Transaction sent! Awaiting confirmation...";
pub const VERIFIED: &str = "You are now verified!";
pub const VERIFY_FAILED: &str =
    "Payment succeeded, but verification failed. Verification will be made manually";
pub const NOT_CONFIRMED: &str = "Transaction was not confirmed. Please try again.";

/// Map a wallet or RPC error to something a user can act on.
pub fn friendly_error(raw: &str) -> &'static str {
    if raw.contains("User rejected the request") {
        "Transaction cancelled by the user."
    } else if raw.contains("insufficient funds for rent") {
        "You don't have enough SOL to complete this transaction."
    } else if raw.contains("Access forbidden") {
        "Your RPC endpoint is not authorized (403)."
    } else {
        "Something went wrong. Please try again."
    }
}

/// `0.1` for 100 000 000 lamports.
pub fn sol_amount(lamports: u64) -> String {
    let sol = lamports as f64 / api::solana::LAMPORTS_PER_SOL as f64;
    let text = format!("{sol:.9}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friendly_errors() {
        assert_eq!(
            friendly_error("WalletSignTransactionError: User rejected the request."),
            "Transaction cancelled by the user."
        );
        assert_eq!(
            friendly_error("Transaction simulation failed: insufficient funds for rent"),
            "You don't have enough SOL to complete this transaction."
        );
        assert_eq!(
            friendly_error("403 Access forbidden"),
            "Your RPC endpoint is not authorized (403)."
        );
        assert_eq!(friendly_error("boom"), "Something went wrong. Please try again.");
    }

    #[test]
    fn test_sol_amount() {
        assert_eq!(sol_amount(100_000_000), "0.1");
        assert_eq!(sol_amount(2_000_000_000), "2");
        assert_eq!(sol_amount(1_500), "0.0000015");
    }
}
