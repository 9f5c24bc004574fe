use crate::gl33::{state::GLState, GL33};
use gl::{self, types::*};
use glint::{
  backend::shader::Shader,
  shader::{ProgramError, StageError, StageType, Uniform, UniformWarning, VertexAttribWarning},
  vertex::VertexAttribDesc,
};
use std::{
  cell::RefCell,
  ffi::{c_void, CString},
  ptr::{self, null, null_mut},
  rc::Rc,
};

/// Compiled shader stage. Deleted on drop.
#[derive(Debug)]
pub struct Stage {
  handle: GLuint,
}

impl Drop for Stage {
  fn drop(&mut self) {
    unsafe {
      gl::DeleteShader(self.handle);
    }
  }
}

/// Linked shader program. Deleted on drop.
#[derive(Debug)]
pub struct Program {
  pub(crate) handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

impl Drop for Program {
  fn drop(&mut self) {
    self.state.borrow_mut().forget_program(self.handle);

    unsafe {
      gl::DeleteProgram(self.handle);
    }
  }
}

impl Program {
  fn link(&self) -> Result<(), ProgramError> {
    let handle = self.handle;

    unsafe {
      gl::LinkProgram(handle);

      let mut linked: GLint = gl::FALSE.into();
      gl::GetProgramiv(handle, gl::LINK_STATUS, &mut linked);

      if linked == gl::TRUE.into() {
        Ok(())
      } else {
        let mut log_len: GLint = 0;
        gl::GetProgramiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

        let mut log = vec![0u8; log_len.max(0) as usize];
        gl::GetProgramInfoLog(
          handle,
          log_len,
          null_mut(),
          log.as_mut_ptr() as *mut GLchar,
        );

        Err(ProgramError::link_failed(info_log_to_string(log)))
      }
    }
  }
}

unsafe impl Shader for GL33 {
  type StageRepr = Stage;

  type ProgramRepr = Program;

  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError> {
    let c_src = CString::new(src.as_bytes()).map_err(|e| {
      StageError::compilation_failed(
        ty,
        format!("source contains a NUL byte at {}", e.nul_position()),
      )
    })?;

    let handle = gl::CreateShader(opengl_shader_type(ty));

    if handle == 0 {
      return Err(StageError::compilation_failed(
        ty,
        "unable to create shader stage",
      ));
    }

    gl::ShaderSource(handle, 1, [c_src.as_ptr()].as_ptr(), null());
    gl::CompileShader(handle);

    let mut compiled: GLint = gl::FALSE.into();
    gl::GetShaderiv(handle, gl::COMPILE_STATUS, &mut compiled);

    if compiled == gl::TRUE.into() {
      Ok(Stage { handle })
    } else {
      let mut log_len: GLint = 0;
      gl::GetShaderiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

      let mut log = vec![0u8; log_len.max(0) as usize];
      gl::GetShaderInfoLog(handle, log_len, null_mut(), log.as_mut_ptr() as *mut GLchar);

      gl::DeleteShader(handle);

      Err(StageError::compilation_failed(ty, info_log_to_string(log)))
    }
  }

  unsafe fn new_program(
    &mut self,
    vertex: &Self::StageRepr,
    fragment: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError> {
    let handle = gl::CreateProgram();

    gl::AttachShader(handle, vertex.handle);
    gl::AttachShader(handle, fragment.handle);

    let program = Program {
      handle,
      state: self.state.clone(),
    };

    // on failure, program is dropped here, hence deleted
    program.link()?;

    gl::DetachShader(handle, vertex.handle);
    gl::DetachShader(handle, fragment.handle);

    Ok(program)
  }

  unsafe fn program_handle(program: &Self::ProgramRepr) -> u32 {
    program.handle
  }

  unsafe fn ask_uniform(
    program: &Self::ProgramRepr,
    name: &str,
  ) -> Result<Uniform, UniformWarning> {
    let c_name = CString::new(name.as_bytes()).map_err(|_| UniformWarning::inactive(name))?;
    let location = gl::GetUniformLocation(program.handle, c_name.as_ptr() as *const GLchar);

    // ensure the location smells good
    if location < 0 {
      return Err(UniformWarning::inactive(name));
    }

    Ok(Uniform::new(location))
  }

  unsafe fn use_program(&mut self, program: &Self::ProgramRepr) {
    self.state.borrow_mut().use_program(program.handle);
  }

  unsafe fn set_uniform_matrix(&mut self, uniform: &Uniform, matrix: &[[f32; 4]; 4]) {
    gl::UniformMatrix4fv(uniform.index(), 1, gl::FALSE, matrix.as_ptr() as *const GLfloat);
  }

  unsafe fn set_vertex_attrib(
    &mut self,
    program: &Self::ProgramRepr,
    desc: &VertexAttribDesc,
  ) -> Result<(), VertexAttribWarning> {
    let index = get_vertex_attrib_location(program, desc.name)?;

    gl::VertexAttribPointer(
      index,
      desc.components as GLint,
      gl::FLOAT,
      gl::FALSE,
      desc.stride as GLsizei,
      ptr::null::<c_void>().add(desc.offset),
    );
    gl::EnableVertexAttribArray(index);

    Ok(())
  }
}

fn opengl_shader_type(t: StageType) -> GLenum {
  match t {
    StageType::VertexShader => gl::VERTEX_SHADER,
    StageType::FragmentShader => gl::FRAGMENT_SHADER,
  }
}

fn get_vertex_attrib_location(program: &Program, name: &str) -> Result<GLuint, VertexAttribWarning> {
  let c_name = CString::new(name.as_bytes()).map_err(|_| VertexAttribWarning::inactive(name))?;
  let location = unsafe { gl::GetAttribLocation(program.handle, c_name.as_ptr() as *const GLchar) };

  if location < 0 {
    Err(VertexAttribWarning::inactive(name))
  } else {
    Ok(location as GLuint)
  }
}

// Info logs are NUL-terminated and drivers don’t always emit valid UTF-8.
fn info_log_to_string(mut log: Vec<u8>) -> String {
  if let Some(nul) = log.iter().position(|&b| b == 0) {
    log.truncate(nul);
  }

  let log = String::from_utf8_lossy(&log);
  let log = log.trim_end();

  if log.is_empty() {
    "no information available".to_owned()
  } else {
    log.to_owned()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn shader_types() {
    assert_eq!(opengl_shader_type(StageType::VertexShader), gl::VERTEX_SHADER);
    assert_eq!(
      opengl_shader_type(StageType::FragmentShader),
      gl::FRAGMENT_SHADER
    );
  }

  #[test]
  fn info_log_stops_at_nul() {
    let log = b"0:3(1): error: syntax error\n\0\0garbage".to_vec();
    assert_eq!(info_log_to_string(log), "0:3(1): error: syntax error");
  }

  #[test]
  fn empty_info_log() {
    assert_eq!(info_log_to_string(Vec::new()), "no information available");
    assert_eq!(info_log_to_string(vec![0]), "no information available");
  }

  #[test]
  fn invalid_utf8_info_log() {
    let log = vec![b'e', 0xff, b'r', 0];
    assert_eq!(info_log_to_string(log), "e\u{fffd}r");
  }
}
