use crate::error::{ChartError, ChartResult};

use super::{Scale, ScaleVariant};

impl Scale {
    /// Sets the power applied by an exponent scale before the linear mapping.
    ///
    /// Negative values keep their sign: `v` maps to `sign(v) * |v|^exponent`.
    pub fn set_exponent(&mut self, value: f64) -> ChartResult<()> {
        if !value.is_finite() || value == 0.0 {
            return Err(ChartError::InvalidData(
                "scale exponent must be finite and non-zero".to_owned(),
            ));
        }
        let scale_type = self.scale_type();
        match &mut self.variant {
            ScaleVariant::Exponent { exponent } => {
                *exponent = value;
                Ok(())
            }
            _ => Err(ChartError::InvalidData(format!(
                "exponent is only used by exponent scales, not {scale_type:?}"
            ))),
        }
    }
}
