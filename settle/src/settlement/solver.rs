//! Greedy settlement matching.

use super::models::{PlayerBalance, Settlement, Transfer};

/// An unmatched party: position in the input plus remaining magnitude.
struct Party {
    index: usize,
    remaining: i64,
}

/// Compute the settlement transfers for a set of player balances.
///
/// Players with positive balances (creditors) are matched against players
/// with negative balances (debtors), largest magnitudes first. Each round
/// transfers `min(credit, |debt|)` from the largest debtor to the largest
/// creditor and drops whichever side reaches zero, so every transfer
/// retires at least one party and the transaction count is bounded by
/// `nonzero_balances - 1` for a balanced ledger.
///
/// Ties on magnitude resolve to the earliest player in the input, which
/// makes the output deterministic: the same balances always produce the
/// same transfer list.
///
/// When total credits and total debits do not cancel, the leftover side
/// survives the loop and is reported in `missing_balances` with its
/// remaining signed value. `bank_balance` is echoed back unchanged as
/// `final_bank_balance` — the bank never participates in the matching.
pub fn solve(balances: &[PlayerBalance], bank_balance: i64) -> Settlement {
    let mut creditors = Vec::new();
    let mut debtors = Vec::new();
    for (index, player) in balances.iter().enumerate() {
        if player.balance > 0 {
            creditors.push(Party {
                index,
                remaining: player.balance,
            });
        } else if player.balance < 0 {
            debtors.push(Party {
                index,
                remaining: player.balance.abs(),
            });
        }
    }

    let mut transactions = Vec::new();
    while !creditors.is_empty() && !debtors.is_empty() {
        let c = largest(&creditors);
        let d = largest(&debtors);
        let amount = creditors[c].remaining.min(debtors[d].remaining);

        transactions.push(Transfer {
            payer: balances[debtors[d].index].name.clone(),
            receiver: balances[creditors[c].index].name.clone(),
            amount,
        });

        creditors[c].remaining -= amount;
        debtors[d].remaining -= amount;
        if creditors[c].remaining == 0 {
            creditors.remove(c);
        }
        if debtors[d].remaining == 0 {
            debtors.remove(d);
        }
    }

    // At most one side is non-empty here; both lists are still in input
    // order, so the residuals come out in input order too.
    let missing_balances = creditors
        .iter()
        .map(|p| PlayerBalance::new(balances[p.index].name.clone(), p.remaining))
        .chain(
            debtors
                .iter()
                .map(|p| PlayerBalance::new(balances[p.index].name.clone(), -p.remaining)),
        )
        .collect();

    Settlement {
        balances: balances.to_vec(),
        transactions,
        missing_balances,
        final_bank_balance: bank_balance,
    }
}

/// Index of the party with the largest remaining magnitude. Strict
/// comparison keeps the earliest party on ties.
fn largest(parties: &[Party]) -> usize {
    let mut best = 0;
    for (i, party) in parties.iter().enumerate().skip(1) {
        if party.remaining > parties[best].remaining {
            best = i;
        }
    }
    best
}
