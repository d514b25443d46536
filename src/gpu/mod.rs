//! GPU presentation.
//!
//! Fireworks are rasterized on the CPU into a [`Pixmap`](crate::raster::Pixmap);
//! this module only gets that frame onto the screen: upload it as a texture,
//! then draw a full-screen triangle that samples it.

mod presenter;

pub use presenter::Presenter;

/// WGSL for the full-screen blit.
pub const BLIT_SHADER: &str = include_str!("blit.wgsl");

#[cfg(test)]
mod tests {
    use super::*;

    fn validate_wgsl(source: &str) -> Result<naga::Module, String> {
        let module = naga::front::wgsl::parse_str(source).map_err(|e| e.emit_to_string(source))?;
        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator.validate(&module).map_err(|e| format!("{e:?}"))?;
        Ok(module)
    }

    #[test]
    fn test_blit_shader_validates() {
        let module = validate_wgsl(BLIT_SHADER).unwrap();
        let entry_points: Vec<&str> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
        assert!(entry_points.contains(&"vs_main"));
        assert!(entry_points.contains(&"fs_main"));
    }

    #[test]
    fn test_blit_shader_binds_texture_and_sampler() {
        let module = validate_wgsl(BLIT_SHADER).unwrap();
        let bindings: Vec<u32> = module
            .global_variables
            .iter()
            .filter_map(|(_, var)| var.binding.as_ref().map(|b| b.binding))
            .collect();
        assert_eq!(bindings.len(), 2);
        assert!(bindings.contains(&0) && bindings.contains(&1));
    }
}
