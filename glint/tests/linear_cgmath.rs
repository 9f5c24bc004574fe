use cgmath::{Matrix4, Point3, Rad, Vector3, Vector4};
use glint::linear::{look_at, perspective, radians, Mat4, Vec3, Vec4};

fn close(a: f32, b: f32) -> bool {
  (a - b).abs() <= 1e-5 * a.abs().max(b.abs()).max(1.)
}

fn assert_close(ours: Mat4, theirs: Matrix4<f32>) {
  let theirs: [[f32; 4]; 4] = theirs.into();

  for (col, (a, b)) in ours.as_array().iter().zip(&theirs).enumerate() {
    for row in 0..4 {
      assert!(
        close(a[row], b[row]),
        "column {}, row {}: {} != {}",
        col,
        row,
        a[row],
        b[row]
      );
    }
  }
}

#[test]
fn perspective_matches_cgmath() {
  for &(fovy, aspect, near, far) in &[
    (90., 4. / 3., 0.1, 4096.),
    (45., 16. / 9., 1., 100.),
    (60., 1., 0.5, 10.),
  ] {
    let ours = perspective(radians(fovy), aspect, near, far);
    let theirs = cgmath::perspective(Rad(radians(fovy)), aspect, near, far);

    assert_close(ours, theirs);
  }
}

#[test]
fn look_at_matches_cgmath() {
  let cases = [
    (Vec3::splat(12.), Vec3::default(), Vec3::new(0., 0., 1.)),
    (Vec3::new(0., 0., 5.), Vec3::default(), Vec3::new(0., 1., 0.)),
    (Vec3::new(3., -2., 7.), Vec3::new(1., 1., 1.), Vec3::new(0., 1., 0.)),
  ];

  for &(eye, target, up) in &cases {
    let ours = look_at(eye, target, up);
    let theirs = Matrix4::look_at_rh(
      Point3::new(eye.x, eye.y, eye.z),
      Point3::new(target.x, target.y, target.z),
      Vector3::from(up),
    );

    assert_close(ours, theirs);
  }
}

#[test]
fn products_agree_with_cgmath() {
  let proj = perspective(radians(90.), 1.5, 0.1, 4096.);
  let view = look_at(Vec3::splat(12.), Vec3::default(), Vec3::new(0., 0., 1.));
  let point = Vec4::new(1., -2., 3., 1.);

  let cg_proj: Matrix4<f32> = proj.into();
  let cg_view: Matrix4<f32> = view.into();
  let cg_point: Vector4<f32> = point.into();

  assert_close(proj * view, cg_proj * cg_view);

  let ours = proj * view * point;
  let theirs = Vec4::from(cg_proj * cg_view * cg_point);
  for i in 0..4 {
    assert!(close(ours[i], theirs[i]), "{} != {}", ours, theirs);
  }
}
