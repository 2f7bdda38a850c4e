//! Poseidon sponge configuration for BN254.
//!
//! Rate 2, capacity 1, x^5 S-box, 8 full and 57 partial rounds. These are
//! the parameters the external circuit was compiled against; changing any
//! of them changes every root and proof this crate produces.

use ark_bn254::Fr;
use ark_crypto_primitives::sponge::poseidon::PoseidonConfig;
use ark_ff::MontFp;

/// Number of full rounds (split evenly between start and end)
const FULL_ROUNDS: usize = 8;

/// Number of partial rounds
const PARTIAL_ROUNDS: usize = 57;

/// S-box exponent
const ALPHA: u64 = 5;

/// Sponge width: rate 2 + capacity 1
const WIDTH: usize = 3;

/// Build the Poseidon configuration used by every hash in this crate.
pub fn poseidon_config() -> PoseidonConfig<Fr> {
    // 3x3 MDS matrix for width 3
    let mds = vec![
        vec![
            MontFp!("7511745149465107256748700652201246547602992235352608707588321460060273774987"),
            MontFp!("10370080108974718697676803824769673834027675643658433702224577712625900127200"),
            MontFp!("19705173408229649878903981084052839426532978878058043055305024233888854471533"),
        ],
        vec![
            MontFp!("18732019378264290557468133440468564866454307626475683536618613112504878618481"),
            MontFp!("20870176810702568768751421378473869562658540583882454726129544628203806653987"),
            MontFp!("7266061498423634438932006217945904744987532209093972706694887950396501989428"),
        ],
        vec![
            MontFp!("9131299761947733513298312097611845208338517739621853568979632113419485819303"),
            MontFp!("10595341252162738537912664445405114076324478519622938027420701542910180337937"),
            MontFp!("11597556804922396090267472882856054602429588299176362916247939723151043581408"),
        ],
    ];

    PoseidonConfig {
        full_rounds: FULL_ROUNDS,
        partial_rounds: PARTIAL_ROUNDS,
        alpha: ALPHA,
        ark: round_constants(),
        mds,
        rate: 2,
        capacity: 1,
    }
}

/// Deterministic round-constant schedule.
fn round_constants() -> Vec<Vec<Fr>> {
    let num_rounds = FULL_ROUNDS + PARTIAL_ROUNDS;
    let mut ark = Vec::with_capacity(num_rounds);

    // "POSEIDON" as a seed
    let mut state = Fr::from(0x504f534549444f4eu64);

    for _ in 0..num_rounds {
        let mut round = Vec::with_capacity(WIDTH);
        for _ in 0..WIDTH {
            state = state * state + Fr::from(7u64);
            round.push(state);
        }
        ark.push(round);
    }

    ark
}
