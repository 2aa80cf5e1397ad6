#[cfg(feature = "integration-tests")]
mod common;

#[cfg(feature = "integration-tests")]
mod render_composition {
    use tint_ngin::{
        Camera, Color, ContextConfig, MeshData, Model, Primitive, Render, Sprite, TintError,
        cgmath::{Vector2, Vector3},
    };

    use crate::common::test_utils::{CENTER, Harness, assert_pixel};

    #[test]
    fn flatten_keeps_submission_order() {
        let h = Harness::new(Color::WHITE);
        let a = Model::from_primitive(&h.ctx, Primitive::Quad).unwrap();
        let b = Model::from_primitive(&h.ctx, Primitive::Triangle).unwrap();
        let c = Model::from_primitive(&h.ctx, Primitive::Quad).unwrap();

        let render = Render::Composed(vec![
            Render::Model(&a),
            Render::None,
            Render::Models(vec![&b, &c]),
            Render::Composed(vec![(&a).into()]),
        ]);
        let flat = render.flatten();
        assert_eq!(flat.len(), 4);
        assert!(std::ptr::eq(flat[0], &a));
        assert!(std::ptr::eq(flat[1], &b));
        assert!(std::ptr::eq(flat[2], &c));
        assert!(std::ptr::eq(flat[3], &a));
        assert!(!render.is_empty());
        assert!(Render::Composed(vec![Render::None, Render::Models(vec![])]).is_empty());
    }

    #[test]
    fn later_draws_win_at_equal_depth() {
        let mut h = Harness::new(Color::WHITE);
        let mut red = Model::from_primitive(&h.ctx, Primitive::Quad).unwrap();
        red.set_color(Color::RED);
        let mut blue = Model::from_primitive(&h.ctx, Primitive::Quad).unwrap();
        blue.set_color(Color::BLUE);

        let img = h.draw(&[(&red).into(), (&blue).into()]);
        assert_pixel(&img, CENTER, Color::BLUE.to_rgba8());

        let img = h.draw(&[Render::Models(vec![&blue, &red])]);
        assert_pixel(&img, CENTER, Color::RED.to_rgba8());
    }

    #[test]
    fn closer_models_occlude_regardless_of_order() {
        let mut h = Harness::new(Color::WHITE);
        let mut near = Model::from_primitive(&h.ctx, Primitive::Quad).unwrap();
        near.translate(Vector3::new(0.0, 0.0, 0.5));
        near.set_color(Color::RED);
        let mut far = Model::from_primitive(&h.ctx, Primitive::Quad).unwrap();
        far.set_color(Color::BLUE);

        let img = h.draw(&[(&near).into(), (&far).into()]);
        assert_pixel(&img, CENTER, Color::RED.to_rgba8());
    }

    #[test]
    fn sprite_follows_its_position() {
        let mut h = Harness::new(Color::WHITE);
        let mut sprite = Sprite::new(&h.ctx).unwrap();
        sprite.set_color(Color::GREEN);
        let img = h.draw(&[(&sprite).into()]);
        assert_pixel(&img, CENTER, Color::GREEN.to_rgba8());

        sprite.set_position(Vector3::new(3.0, 0.0, 0.0));
        let img = h.draw(&[(&sprite).into()]);
        assert_pixel(&img, CENTER, Color::WHITE.to_rgba8());
    }

    #[test]
    fn orthographic_camera_shows_scaled_sprite() {
        let config = ContextConfig::default()
            .with_clear_colour(Color::BLACK)
            .with_camera(Camera::default().orthographic());
        let mut h = Harness::with_config(config);
        let mut sprite = Sprite::new(&h.ctx).unwrap();
        sprite.set_color(Color::ORANGE);
        // a unit quad spans 1/8 of the view; scaled by 4 it covers half
        sprite.set_scale(Vector2::new(4.0, 4.0));
        let img = h.draw(&[(&sprite).into()]);
        assert_pixel(&img, (20, 20), Color::ORANGE.to_rgba8());
        assert_pixel(&img, (4, 4), Color::BLACK.to_rgba8());
    }

    #[test]
    fn camera_changes_apply_on_next_render() {
        let mut h = Harness::new(Color::WHITE);
        let mut quad = Model::from_primitive(&h.ctx, Primitive::Quad).unwrap();
        quad.set_color(Color::RED);
        h.ctx.camera_mut().position = [0.0, 0.0, -2.0].into();
        // looking at the quad from behind; there is no culling
        let img = h.draw(&[(&quad).into()]);
        assert_pixel(&img, CENTER, Color::RED.to_rgba8());

        h.ctx.camera_mut().target = [0.0, 0.0, -10.0].into();
        let img = h.draw(&[(&quad).into()]);
        assert_pixel(&img, CENTER, Color::WHITE.to_rgba8());
    }

    #[test]
    fn invalid_mesh_is_rejected() {
        let h = Harness::new(Color::WHITE);
        let err = Model::new(&h.ctx, MeshData::default()).unwrap_err();
        assert_eq!(err, TintError::EmptyMesh);

        let outline = MeshData::from_polygon(&[
            Vector2::new(-0.5, -0.5),
            Vector2::new(0.5, -0.5),
            Vector2::new(0.0, 0.5),
        ]);
        assert!(Model::new(&h.ctx, outline).is_ok());
    }

    #[test]
    fn replaced_mesh_data_is_drawn_and_outlined() {
        let mut h = Harness::new(Color::WHITE);
        let mut model = Model::from_primitive(&h.ctx, Primitive::Quad).unwrap();
        model.set_color(Color::RED);
        let img = h.draw(&[(&model).into()]);
        assert_pixel(&img, CENTER, Color::RED.to_rgba8());

        // a square off to the right of the view centre
        let moved = MeshData::from_polygon(&[
            Vector2::new(1.0, -0.5),
            Vector2::new(2.0, -0.5),
            Vector2::new(2.0, 0.5),
            Vector2::new(1.0, 0.5),
        ]);
        model.set_mesh_data(&h.ctx, moved).unwrap();
        let (min, max) = model.polygon().bounds().unwrap();
        assert_eq!(min, Vector2::new(1.0, -0.5));
        assert_eq!(max, Vector2::new(2.0, 0.5));
        let img = h.draw(&[(&model).into()]);
        assert_pixel(&img, CENTER, Color::WHITE.to_rgba8());

        let err = model.set_mesh_data(&h.ctx, MeshData::default()).unwrap_err();
        assert_eq!(err, TintError::EmptyMesh);
        assert_eq!(model.polygon().bounds().unwrap().0, Vector2::new(1.0, -0.5));
    }

    #[test]
    fn sprite_texture_can_be_disabled() {
        let mut h = Harness::new(Color::WHITE);
        let texture = h.texture(1, 1, &[255, 255, 0, 255]);
        let mut sprite = Sprite::from_texture(&h.ctx, texture).unwrap();
        sprite.set_color(Color::AQUA);
        assert!(sprite.texture_enabled());
        let img = h.draw(&[(&sprite).into()]);
        assert_pixel(&img, CENTER, Color::GREEN.to_rgba8());

        sprite.set_texture_enabled(false);
        assert!(!sprite.texture_enabled());
        let img = h.draw(&[(&sprite).into()]);
        assert_pixel(&img, CENTER, Color::AQUA.to_rgba8());
    }

    #[test]
    fn headless_context_has_no_window() {
        let h = Harness::new(Color::WHITE);
        assert!(h.ctx.is_offscreen());
        assert!(h.ctx.window().is_none());
    }
}
