use fltk::text::TextBuffer;

/// Copy the text out of an FLTK `TextBuffer` and free FLTK's copy.
///
/// `TextBuffer::text()` leaks the `malloc()`'d string FLTK hands back, and
/// the front-end reads the visible editor buffer before each tab operation,
/// so the leak would grow with every click.
pub fn buffer_text_no_leak(buf: &TextBuffer) -> String {
    unsafe extern "C" {
        fn Fl_Text_Buffer_text(buf: *mut std::ffi::c_void) -> *mut std::ffi::c_char;
        fn free(ptr: *mut std::ffi::c_void);
    }

    // SAFETY: `buf.as_ptr()` is the live Fl_Text_Buffer behind `buf`.
    // Fl_Text_Buffer_text returns a NUL-terminated malloc'd copy (or null),
    // which is read once and released with the matching `free`.
    unsafe {
        let ptr = Fl_Text_Buffer_text(buf.as_ptr() as *mut std::ffi::c_void);
        if ptr.is_null() {
            return String::new();
        }
        let text = std::ffi::CStr::from_ptr(ptr).to_string_lossy().into_owned();
        free(ptr as *mut std::ffi::c_void);
        text
    }
}
