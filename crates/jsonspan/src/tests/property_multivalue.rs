use alloc::{string::String, vec::Vec};

use quickcheck_macros::quickcheck;

use super::{
    arbitrary::{ObjectText, Separator},
    split_all,
};
use crate::{SplitterOptions, chunk_utils::split_with_seed, split_chunks};

fn concat(values: &[(ObjectText, Separator)]) -> String {
    values
        .iter()
        .flat_map(|(object, sep)| [object.0.as_str(), sep.0.as_str()])
        .collect()
}

#[quickcheck]
#[allow(clippy::needless_pass_by_value)]
fn concatenated_objects_come_back_in_order(
    values: Vec<(ObjectText, Separator)>,
    seed: u64,
) -> bool {
    let src = concat(&values);
    let spans = split_all(&split_with_seed(&src, seed), SplitterOptions::default());
    let expected: Vec<&str> = values.iter().map(|(object, _)| object.0.as_str()).collect();
    spans == expected
}

#[quickcheck]
#[allow(clippy::needless_pass_by_value)]
fn one_line_per_chunk_matches_one_chunk(values: Vec<(ObjectText, Separator)>) -> bool {
    let src = concat(&values);
    let by_line: Vec<String> = split_chunks(src.split_inclusive('\n'))
        .map(Result::unwrap)
        .collect();
    let whole: Vec<String> = split_chunks([src.as_str()]).map(Result::unwrap).collect();
    by_line == whole && whole.len() == values.len()
}
