//! Operator-facing notification texts (Vietnamese)

/// Toast after a successful create.
pub const CREATE_SUCCESS: &str = "Tạo thành công!";
/// Toast after a successful update.
pub const UPDATE_SUCCESS: &str = "Cập nhật thành công!";
/// Toast after a successful delete.
pub const DELETE_SUCCESS: &str = "Xóa thành công!";

/// Title of the delete confirmation prompt.
pub const CONFIRM_DELETE_TITLE: &str = "Xác nhận xóa";

/// Fallback when a failed load carries no message.
pub const LOAD_FAILED: &str = "Không thể tải dữ liệu. Vui lòng thử lại.";
/// Fallback when a failed create/update carries no message.
pub const SAVE_FAILED: &str = "Không thể lưu dữ liệu. Vui lòng thử lại.";
/// Fallback when a failed delete carries no message.
pub const DELETE_FAILED: &str = "Không thể xóa dữ liệu. Vui lòng thử lại.";

/// Body of the delete confirmation prompt for the item called `name`.
pub fn confirm_delete_description(name: &str) -> String {
    format!("Bạn có chắc chắn muốn xóa \"{name}\"? Hành động này không thể hoàn tác.")
}

/// Error text when a page did not wire up `operation`.
pub fn operation_unavailable(operation: &str) -> String {
    format!("Thao tác không khả dụng: {operation}")
}
