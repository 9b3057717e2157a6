//! One time-stamped robot state parsed from a trajectory row.

use glam::{Quat, Vec3};
use serde::Serialize;

use super::error::ParseError;
use super::layout::{
    EffectorLayout, BASE_ORIENTATION_COLUMN, BASE_POSITION_COLUMN, EFFECTOR_STRIDE,
    FIXED_PREFIX_LEN, POSITION_SCALE,
};

/// Base pose and foot positions at one instant of the trajectory.
///
/// Positions are in centimetres. The orientation is taken verbatim from the
/// file: towr is right-handed while most game hosts are left-handed, and no
/// conversion is applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectorySample {
    /// XYZ position of the base in world frame
    pub base_position: Vec3,
    /// Base orientation quaternion (x, y, z, w) in world frame
    pub base_orientation: Quat,
    /// XYZ position of each foot in world frame
    pub foot_positions: Vec<Vec3>,
}

impl TrajectorySample {
    /// Parse a sample from the comma-split fields of one data row.
    ///
    /// `row` is the physical line number, used only for error reporting.
    pub fn parse(
        fields: &[&str],
        row: usize,
        layout: EffectorLayout,
    ) -> Result<Self, ParseError> {
        let effectors = effector_count(fields.len(), row)?;
        let field = |column: usize| parse_field(fields, column, row);

        let base_position = parse_position(fields, BASE_POSITION_COLUMN, row)?;
        let base_orientation = Quat::from_xyzw(
            field(BASE_ORIENTATION_COLUMN)?,
            field(BASE_ORIENTATION_COLUMN + 1)?,
            field(BASE_ORIENTATION_COLUMN + 2)?,
            field(BASE_ORIENTATION_COLUMN + 3)?,
        );

        let foot_positions = (0..effectors)
            .map(|ee| parse_position(fields, layout.position_column(ee), row))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            base_position,
            base_orientation,
            foot_positions,
        })
    }

    /// Number of end effectors in this sample.
    pub fn effector_count(&self) -> usize {
        self.foot_positions.len()
    }
}

/// Number of end-effector blocks a row of `len` fields carries.
pub fn effector_count(len: usize, row: usize) -> Result<usize, ParseError> {
    if len < FIXED_PREFIX_LEN {
        return Err(ParseError::TooFewFields {
            row,
            expected: FIXED_PREFIX_LEN,
            found: len,
        });
    }

    let remainder = (len - FIXED_PREFIX_LEN) % EFFECTOR_STRIDE;
    if remainder != 0 {
        return Err(ParseError::EffectorStride {
            row,
            found: len,
            stride: EFFECTOR_STRIDE,
            remainder,
        });
    }

    Ok((len - FIXED_PREFIX_LEN) / EFFECTOR_STRIDE)
}

fn parse_position(fields: &[&str], column: usize, row: usize) -> Result<Vec3, ParseError> {
    let x = parse_field(fields, column, row)?;
    let y = parse_field(fields, column + 1, row)?;
    let z = parse_field(fields, column + 2, row)?;
    Ok(Vec3::new(x, y, z) * POSITION_SCALE)
}

fn parse_field(fields: &[&str], column: usize, row: usize) -> Result<f32, ParseError> {
    // effector_count() has already checked the row length against the layout
    let token = fields.get(column).copied().unwrap_or_default();

    match token.trim().parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ParseError::InvalidNumber {
            row,
            column,
            token: token.to_string(),
        }),
    }
}
