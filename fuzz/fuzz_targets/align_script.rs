#![no_main]

use diagverify_core::{align, edit_distance, EditOp};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let cut = (split as usize).min(rest.len()).min(64);
    let (truth, received) = rest.split_at(cut);
    let received = &received[..received.len().min(64)];

    let script = align(truth, received, |a, b| a % 4 == b % 4);
    assert_eq!(
        script.cost(),
        edit_distance(truth, received, |a, b| a % 4 == b % 4)
    );

    let (mut i, mut j) = (0usize, 0usize);
    for op in script.chronological() {
        if op == EditOp::Keep {
            assert_eq!(truth[i] % 4, received[j] % 4);
        }
        let (di, dj) = op.consumes();
        i += di;
        j += dj;
    }
    assert_eq!((i, j), (truth.len(), received.len()));
});
