#![allow(clippy::many_single_char_names)]

//! A recursive Whitted-style ray tracer over analytic primitives.
//!
//! A [`scene::Scene`] holds geometry and lights, a [`tracer::RayTracer`] turns rays
//! into colors, and a [`camera::Camera`] shoots rays through a view plane and writes
//! the colors into an [`output::ImageWriter`].

pub mod camera;
pub mod lighting;
pub mod material;
pub mod math;
pub mod object;
pub mod output;
pub mod scene;
pub mod tracer;
