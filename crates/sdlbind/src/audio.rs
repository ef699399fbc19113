//! Audio devices and streams
//!
//! [`AudioStream`] owns a native stream and, when opened with a callback,
//! the boxed closure the audio thread calls. Dropping the stream destroys
//! the native object first (which also stops the device callback) and only
//! then frees the closure.

use crate::error::Result;
use crate::ffi::callbacks::{self, CallbackHandle};
use crate::ffi::marshal::{self, MarshalContext};
use crate::rect::opt_ptr;
use crate::sdl::Sdl;
use crate::sys::{SDL_AudioDeviceID, SDL_AudioStream, SDL_AudioStreamCallback};
use std::ffi::c_int;
use std::fmt;
use std::ptr::{self, NonNull};

/// `SDL_AudioFormat`: bit size in the low byte, flags above
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AudioFormat(pub u32);

impl AudioFormat {
    pub const UNKNOWN: Self = Self(0x0000);
    pub const U8: Self = Self(0x0008);
    pub const S8: Self = Self(0x8008);
    pub const S16LE: Self = Self(0x8010);
    pub const S16BE: Self = Self(0x9010);
    pub const S32LE: Self = Self(0x8020);
    pub const S32BE: Self = Self(0x9020);
    pub const F32LE: Self = Self(0x8120);
    pub const F32BE: Self = Self(0x9120);

    #[cfg(target_endian = "little")]
    pub const S16: Self = Self::S16LE;
    #[cfg(target_endian = "little")]
    pub const S32: Self = Self::S32LE;
    #[cfg(target_endian = "little")]
    pub const F32: Self = Self::F32LE;
    #[cfg(target_endian = "big")]
    pub const S16: Self = Self::S16BE;
    #[cfg(target_endian = "big")]
    pub const S32: Self = Self::S32BE;
    #[cfg(target_endian = "big")]
    pub const F32: Self = Self::F32BE;

    pub const fn bit_size(self) -> u32 {
        self.0 & 0xFF
    }

    pub const fn byte_size(self) -> u32 {
        self.bit_size() / 8
    }

    pub const fn is_float(self) -> bool {
        self.0 & 0x0100 != 0
    }

    pub const fn is_big_endian(self) -> bool {
        self.0 & 0x1000 != 0
    }

    pub const fn is_signed(self) -> bool {
        self.0 & 0x8000 != 0
    }
}

/// Default playback device for [`Sdl::open_audio_device_stream`]
pub const AUDIO_DEVICE_DEFAULT_PLAYBACK: SDL_AudioDeviceID = 0xFFFF_FFFF;
/// Default recording device
pub const AUDIO_DEVICE_DEFAULT_RECORDING: SDL_AudioDeviceID = 0xFFFF_FFFE;

/// `SDL_AudioSpec`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AudioSpec {
    pub format: AudioFormat,
    pub channels: i32,
    pub freq: i32,
}

impl AudioSpec {
    pub const fn new(format: AudioFormat, channels: i32, freq: i32) -> Self {
        Self { format, channels, freq }
    }

    /// Size of one sample frame in bytes
    pub const fn frame_size(&self) -> u32 {
        self.format.byte_size() * self.channels as u32
    }
}

/// Preferred format of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioDeviceFormat {
    pub spec: AudioSpec,
    /// Device buffer size in sample frames
    pub sample_frames: i32,
}

/// A decoded WAVE file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wav {
    pub spec: AudioSpec,
    pub data: Vec<u8>,
}

type StreamFn = Box<dyn FnMut(NonNull<SDL_AudioStream>, i32, i32) + Send>;

/// Borrowed view of a stream, handed to stream callbacks
pub struct AudioStreamRef<'a> {
    sdl: &'a Sdl,
    raw: NonNull<SDL_AudioStream>,
}

impl<'a> AudioStreamRef<'a> {
    /// Queue audio in the stream's input format
    pub fn put_data(&self, data: &[u8]) -> Result<()> {
        let len = marshal::len_to_c_int(data.len())?;
        self.sdl
            .check(unsafe { (self.sdl.api().SDL_PutAudioStreamData)(self.raw.as_ptr(), data.as_ptr().cast(), len) })
    }

    /// Read converted audio; returns the number of bytes written
    pub fn get_data(&self, buffer: &mut [u8]) -> Result<usize> {
        let len = marshal::len_to_c_int(buffer.len())?;
        let read = unsafe { (self.sdl.api().SDL_GetAudioStreamData)(self.raw.as_ptr(), buffer.as_mut_ptr().cast(), len) };
        usize::try_from(read).map_err(|_| self.sdl.last_error())
    }

    /// Converted bytes ready to read
    pub fn available(&self) -> Result<usize> {
        let n = unsafe { (self.sdl.api().SDL_GetAudioStreamAvailable)(self.raw.as_ptr()) };
        usize::try_from(n).map_err(|_| self.sdl.last_error())
    }

    /// Input bytes queued but not yet converted
    pub fn queued(&self) -> Result<usize> {
        let n = unsafe { (self.sdl.api().SDL_GetAudioStreamQueued)(self.raw.as_ptr()) };
        usize::try_from(n).map_err(|_| self.sdl.last_error())
    }

    pub fn as_ptr(&self) -> *mut SDL_AudioStream {
        self.raw.as_ptr()
    }
}

/// Owned audio stream
pub struct AudioStream {
    sdl: Sdl,
    raw: NonNull<SDL_AudioStream>,
    callback: Option<CallbackHandle<StreamFn>>,
}

// The native stream is internally locked and may be used from any thread.
unsafe impl Send for AudioStream {}

impl AudioStream {
    pub fn stream_ref(&self) -> AudioStreamRef<'_> {
        AudioStreamRef {
            sdl: &self.sdl,
            raw: self.raw,
        }
    }

    pub fn put_data(&self, data: &[u8]) -> Result<()> {
        self.stream_ref().put_data(data)
    }

    pub fn get_data(&self, buffer: &mut [u8]) -> Result<usize> {
        self.stream_ref().get_data(buffer)
    }

    pub fn available(&self) -> Result<usize> {
        self.stream_ref().available()
    }

    pub fn queued(&self) -> Result<usize> {
        self.stream_ref().queued()
    }

    /// Convert everything queued, even a partial final frame
    pub fn flush(&self) -> Result<()> {
        self.sdl.check(unsafe { (self.sdl.api().SDL_FlushAudioStream)(self.raw.as_ptr()) })
    }

    /// Drop queued and converted data
    pub fn clear(&self) -> Result<()> {
        self.sdl.check(unsafe { (self.sdl.api().SDL_ClearAudioStream)(self.raw.as_ptr()) })
    }

    pub fn pause_device(&self) -> Result<()> {
        self.sdl.check(unsafe { (self.sdl.api().SDL_PauseAudioStreamDevice)(self.raw.as_ptr()) })
    }

    /// Device streams start paused
    pub fn resume_device(&self) -> Result<()> {
        self.sdl.check(unsafe { (self.sdl.api().SDL_ResumeAudioStreamDevice)(self.raw.as_ptr()) })
    }

    pub fn device_paused(&self) -> bool {
        marshal::decode_bool(unsafe { (self.sdl.api().SDL_AudioStreamDevicePaused)(self.raw.as_ptr()) })
    }

    /// Input and output formats
    pub fn format(&self) -> Result<(AudioSpec, AudioSpec)> {
        let (mut src, mut dst) = (AudioSpec::default(), AudioSpec::default());
        self.sdl
            .check(unsafe { (self.sdl.api().SDL_GetAudioStreamFormat)(self.raw.as_ptr(), &mut src, &mut dst) })?;
        Ok((src, dst))
    }

    pub fn set_gain(&self, gain: f32) -> Result<()> {
        self.sdl.check(unsafe { (self.sdl.api().SDL_SetAudioStreamGain)(self.raw.as_ptr(), gain) })
    }

    pub fn gain(&self) -> Result<f32> {
        let gain = unsafe { (self.sdl.api().SDL_GetAudioStreamGain)(self.raw.as_ptr()) };
        if gain < 0.0 {
            Err(self.sdl.last_error())
        } else {
            Ok(gain)
        }
    }

    pub fn as_ptr(&self) -> *mut SDL_AudioStream {
        self.raw.as_ptr()
    }
}

impl Drop for AudioStream {
    fn drop(&mut self) {
        unsafe { (self.sdl.api().SDL_DestroyAudioStream)(self.raw.as_ptr()) }
    }
}

impl fmt::Debug for AudioStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioStream")
            .field("raw", &self.raw)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

impl Sdl {
    pub fn audio_drivers(&self) -> Vec<String> {
        self.driver_names(self.api().SDL_GetNumAudioDrivers, self.api().SDL_GetAudioDriver)
    }

    /// Name of the initialised driver, `None` before audio init
    pub fn current_audio_driver(&self) -> Option<String> {
        unsafe { marshal::opt_string_from_ptr((self.api().SDL_GetCurrentAudioDriver)()) }
    }

    pub fn audio_playback_devices(&self) -> Result<Vec<SDL_AudioDeviceID>> {
        let mut count: c_int = 0;
        let list = unsafe { (self.api().SDL_GetAudioPlaybackDevices)(&mut count) };
        self.take_list(list, count)
    }

    pub fn audio_recording_devices(&self) -> Result<Vec<SDL_AudioDeviceID>> {
        let mut count: c_int = 0;
        let list = unsafe { (self.api().SDL_GetAudioRecordingDevices)(&mut count) };
        self.take_list(list, count)
    }

    pub fn audio_device_name(&self, device: SDL_AudioDeviceID) -> Result<String> {
        let name = self.check_const_ptr(unsafe { (self.api().SDL_GetAudioDeviceName)(device) })?;
        Ok(unsafe { marshal::string_from_ptr(name) })
    }

    pub fn audio_device_format(&self, device: SDL_AudioDeviceID) -> Result<AudioDeviceFormat> {
        let mut spec = AudioSpec::default();
        let mut sample_frames: c_int = 0;
        self.check(unsafe { (self.api().SDL_GetAudioDeviceFormat)(device, &mut spec, &mut sample_frames) })?;
        Ok(AudioDeviceFormat { spec, sample_frames })
    }

    /// Open a device and bind a new stream to it; the device starts paused
    ///
    /// `spec` is the format the application supplies; `None` uses the
    /// device's own.
    pub fn open_audio_device_stream(&self, device: SDL_AudioDeviceID, spec: Option<&AudioSpec>) -> Result<AudioStream> {
        let raw = unsafe { (self.api().SDL_OpenAudioDeviceStream)(device, opt_ptr(spec), None, ptr::null_mut()) };
        Ok(AudioStream {
            sdl: self.clone(),
            raw: self.check_ptr(raw)?,
            callback: None,
        })
    }

    /// Like [`Sdl::open_audio_device_stream`], with a callback run on the
    /// audio thread whenever the device needs (playback) or has (recording)
    /// more data
    pub fn open_audio_device_stream_with_callback<F>(
        &self,
        device: SDL_AudioDeviceID,
        spec: Option<&AudioSpec>,
        mut callback: F,
    ) -> Result<AudioStream>
    where
        F: FnMut(&AudioStreamRef<'_>, i32, i32) + Send + 'static,
    {
        let sdl = self.clone();
        let forward: StreamFn = Box::new(move |raw, additional, total| {
            callback(&AudioStreamRef { sdl: &sdl, raw }, additional, total)
        });
        let handle = CallbackHandle::new(forward);
        let trampoline: SDL_AudioStreamCallback = callbacks::audio_stream::<StreamFn>;
        let raw =
            unsafe { (self.api().SDL_OpenAudioDeviceStream)(device, opt_ptr(spec), Some(trampoline), handle.userdata()) };
        Ok(AudioStream {
            sdl: self.clone(),
            raw: self.check_ptr(raw)?,
            callback: Some(handle),
        })
    }

    /// Standalone converter from `src` to `dst`
    pub fn create_audio_stream(&self, src: &AudioSpec, dst: &AudioSpec) -> Result<AudioStream> {
        let raw = self.check_ptr(unsafe { (self.api().SDL_CreateAudioStream)(src, dst) })?;
        Ok(AudioStream {
            sdl: self.clone(),
            raw,
            callback: None,
        })
    }

    /// Load a WAVE file; the native buffer is copied and released
    pub fn load_wav(&self, path: &str) -> Result<Wav> {
        let mut ctx = MarshalContext::new();
        let path = ctx.c_str(path)?;
        let mut spec = AudioSpec::default();
        let mut buffer: *mut u8 = ptr::null_mut();
        let mut len: u32 = 0;
        self.check(unsafe { (self.api().SDL_LoadWAV)(path, &mut spec, &mut buffer, &mut len) })?;
        // u32 always fits usize on supported targets
        let data = unsafe { marshal::take_native_buffer(buffer, len as usize, self.free_fn()) };
        Ok(Wav { spec, data })
    }
}
