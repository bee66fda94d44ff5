use pinnie_core::WindowResult;
use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::System::Threading::{
    OpenProcess, PROCESS_ACCESS_RIGHTS, PROCESS_QUERY_LIMITED_INFORMATION, PROCESS_TERMINATE,
    TerminateProcess,
};

/// Owned process handle, closed on drop.
struct ProcessHandle(HANDLE);

impl ProcessHandle {
    fn open(access: PROCESS_ACCESS_RIGHTS, pid: u32) -> WindowResult<Self> {
        // SAFETY: OpenProcess attempts to open an existing process.
        let handle = unsafe { OpenProcess(access, false, pid)? };
        Ok(Self(handle))
    }
}

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        // SAFETY: the wrapper owns the handle exclusively.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// Checks whether a process with the given PID is still alive.
///
/// Used to detect stale PID files left behind when the daemon was
/// killed without a clean shutdown.
pub fn is_process_alive(pid: u32) -> bool {
    ProcessHandle::open(PROCESS_QUERY_LIMITED_INFORMATION, pid).is_ok()
}

/// Forcibly terminates a process.
///
/// Last resort for a daemon that no longer answers on its pipe. Pinned
/// windows keep their topmost state in that case.
pub fn kill_process(pid: u32) -> WindowResult<()> {
    let process = ProcessHandle::open(PROCESS_TERMINATE, pid)?;
    // SAFETY: the handle was opened with PROCESS_TERMINATE.
    unsafe { TerminateProcess(process.0, 1)? };
    Ok(())
}
