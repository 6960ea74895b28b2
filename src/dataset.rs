//! A small three-alternative example with ten observations.
//!
//! Variables `X1`, `X2`, `Sero` and `S1` are followed by the availability columns
//! `AV1`, `AV2` and `AV3`. Seven parameters drive the three utilities:
//!
//! - `b_01 + b_1 * X1 + b_s1_13 * S1`
//! - `b_02 + b_2 * X2 + b_s1_23 * S1`
//! - `b_03 + b_1 * Sero + b_2 * Sero`

use crate::{
    data::{ObservationTable, ParameterSet},
    utility::{LinearUtility, UtilityExpression},
};

pub fn parameters() -> ParameterSet {
    [
        ("b_01", 0.1),
        ("b_1", -0.5),
        ("b_2", -0.4),
        ("b_02", 1.0),
        ("b_03", 0.0),
        ("b_s1_13", 0.33),
        ("b_s1_23", 0.58),
    ]
    .into_iter()
    .collect()
}

pub fn observations() -> ObservationTable {
    [
        ("X1", [2.0, 1.0, 3.0, 4.0, 2.0, 1.0, 8.0, 7.0, 3.0, 2.0]),
        ("X2", [8.0, 7.0, 4.0, 1.0, 4.0, 7.0, 2.0, 2.0, 3.0, 1.0]),
        ("Sero", [0.0; 10]),
        ("S1", [3.0, 8.0, 4.0, 7.0, 1.0, 6.0, 5.0, 9.0, 2.0, 3.0]),
        ("AV1", [1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0]),
        ("AV2", [1.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 1.0]),
        ("AV3", [1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]),
    ]
    .into_iter()
    .collect()
}

pub fn utilities() -> Vec<Box<dyn UtilityExpression>> {
    vec![
        Box::new(
            LinearUtility::empty()
                .constant("b_01")
                .term("b_1", "X1")
                .term("b_s1_13", "S1"),
        ),
        Box::new(
            LinearUtility::empty()
                .constant("b_02")
                .term("b_2", "X2")
                .term("b_s1_23", "S1"),
        ),
        Box::new(
            LinearUtility::empty()
                .constant("b_03")
                .term("b_1", "Sero")
                .term("b_2", "Sero"),
        ),
    ]
}
