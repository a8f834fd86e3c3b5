//! Pipeline driver: sequences the stages and owns the intermediates.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;
use voxel_types::ByteVolume;

use crate::cleanup::cleanup;
use crate::cover::ball_cover;
use crate::edt::distance_map;
use crate::error::{ThicknessError, ThicknessResult};
use crate::mask::trim_overhang;
use crate::params::ThicknessParams;
use crate::result::ThicknessMap;
use crate::ridge::distance_ridge;

/// Computes the local thickness map of a binary volume.
///
/// Runs distance transform, distance ridge, ball cover, and clean-up in
/// sequence, plus the overhang trim when enabled in `params`. Each
/// intermediate volume is dropped as soon as the next stage has consumed it.
/// The input volume is never modified.
///
/// # Errors
///
/// Returns [`ThicknessError::Volume`] for an invalid threshold, or
/// [`ThicknessError::WorkerPanic`] if a stage panics (in which case no
/// partial output exists).
pub fn compute_local_thickness(
    input: &ByteVolume,
    params: &ThicknessParams,
) -> ThicknessResult<ThicknessMap> {
    run(input, params, None)
}

/// Like [`compute_local_thickness`], re-checking `cancel` between stages.
///
/// Stages are not interrupted mid-flight; a set flag takes effect at the
/// next stage boundary.
///
/// # Errors
///
/// As [`compute_local_thickness`], plus [`ThicknessError::Cancelled`] when
/// the flag is observed set.
pub fn compute_local_thickness_cancellable(
    input: &ByteVolume,
    params: &ThicknessParams,
    cancel: &AtomicBool,
) -> ThicknessResult<ThicknessMap> {
    run(input, params, Some(cancel))
}

fn run(
    input: &ByteVolume,
    params: &ThicknessParams,
    cancel: Option<&AtomicBool>,
) -> ThicknessResult<ThicknessMap> {
    let rule = params.classifier()?;
    let shape = input.shape();
    info!(
        shape = %shape,
        threshold = params.threshold,
        inverse = params.inverse,
        trim = params.trim_overhang,
        "starting local thickness pipeline"
    );

    let distance = stage("distance transform", cancel, || distance_map(input, rule))?;
    let ridge = stage("distance ridge", cancel, || distance_ridge(&distance))?;
    drop(distance);
    let cover = stage("ball cover", cancel, || ball_cover(&ridge))?;
    drop(ridge);
    let cleaned = stage("clean-up", cancel, || cleanup(&cover))?;
    drop(cover);

    let map = if params.trim_overhang {
        stage("overhang trim", cancel, || {
            trim_overhang(&cleaned, input, rule)
        })??
    } else {
        cleaned
    };

    let result = ThicknessMap::from_volume(map);
    info!(
        max_thickness = result.max_thickness,
        foreground_voxels = result.foreground_voxels,
        "local thickness pipeline complete"
    );
    Ok(result)
}

/// Runs one stage, converting a worker panic into an error instead of
/// unwinding through the driver with buffers half-built.
fn stage<T>(
    name: &'static str,
    cancel: Option<&AtomicBool>,
    op: impl FnOnce() -> T,
) -> ThicknessResult<T> {
    if let Some(flag) = cancel {
        if flag.load(Ordering::Relaxed) {
            info!(stage = name, "pipeline cancelled before stage");
            return Err(ThicknessError::Cancelled);
        }
    }
    catch_unwind(AssertUnwindSafe(op)).map_err(|_| ThicknessError::WorkerPanic { stage: name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxel_types::VolumeShape;

    #[test]
    fn test_invalid_threshold_rejected() {
        let shape = VolumeShape::new(4, 4, 4).unwrap();
        let input = ByteVolume::filled(shape, 255);
        let params = ThicknessParams::default().threshold(0);
        assert!(matches!(
            compute_local_thickness(&input, &params),
            Err(ThicknessError::Volume(_))
        ));
    }

    #[test]
    fn test_preset_cancel_flag_stops_before_first_stage() {
        let shape = VolumeShape::new(4, 4, 4).unwrap();
        let input = ByteVolume::filled(shape, 255);
        let cancel = AtomicBool::new(true);
        assert!(matches!(
            compute_local_thickness_cancellable(&input, &ThicknessParams::default(), &cancel),
            Err(ThicknessError::Cancelled)
        ));
    }

    #[test]
    fn test_unset_cancel_flag_is_ignored() {
        let shape = VolumeShape::new(4, 4, 4).unwrap();
        let input = ByteVolume::filled(shape, 255);
        let cancel = AtomicBool::new(false);
        let result =
            compute_local_thickness_cancellable(&input, &ThicknessParams::default(), &cancel);
        assert!(result.is_ok());
    }

    #[test]
    fn test_stage_reports_worker_panic() {
        let result: ThicknessResult<()> = stage("test stage", None, || panic!("boom"));
        assert!(matches!(
            result,
            Err(ThicknessError::WorkerPanic {
                stage: "test stage"
            })
        ));
    }
}
