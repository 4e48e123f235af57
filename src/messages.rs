//! Localized fallback messages recorded by stores when the server sends no
//! `error` text. Staff-facing strings are Vietnamese; the cashier-shift ones
//! were always English on the terminal and stay that way.

// waiter/barista shifts
pub const SHIFT_START: &str = "Lỗi mở ca";
pub const SHIFT_END: &str = "Lỗi kết ca";
pub const SHIFT_CLOSE: &str = "Lỗi chốt ca";
pub const SHIFT_LOAD: &str = "Lỗi tải ca";
pub const SHIFTS_LOAD: &str = "Lỗi tải shifts";
pub const HANDOVER_CREATE: &str = "Lỗi tạo yêu cầu bàn giao";
pub const HANDOVER_AND_END: &str = "Lỗi bàn giao và kết ca";
pub const HANDOVER_LOAD: &str = "Lỗi tải handover";
pub const HANDOVER_HISTORY_LOAD: &str = "Lỗi tải lịch sử bàn giao";
pub const HANDOVER_CANCEL: &str = "Lỗi hủy bàn giao";
pub const HANDOVER_ALREADY_PENDING: &str = "Ca đã có yêu cầu bàn giao đang chờ xử lý";

// cashier queue
pub const PENDING_HANDOVERS_LOAD: &str = "Lỗi tải handovers chờ xử lý";
pub const TODAY_HANDOVERS_LOAD: &str = "Lỗi tải handovers hôm nay";
pub const HANDOVER_CONFIRM: &str = "Lỗi xác nhận handover";
pub const HANDOVER_RECONCILE: &str = "Lỗi đối soát handover";
pub const HANDOVER_REJECT: &str = "Lỗi từ chối handover";
pub const DISCREPANCY_STATS_LOAD: &str = "Lỗi tải thống kê chênh lệch";
pub const REJECT_REASON_REQUIRED: &str = "Vui lòng nhập lý do từ chối";

// manager
pub const APPROVALS_LOAD: &str = "Lỗi tải danh sách phê duyệt";
pub const APPROVAL_DECIDE: &str = "Lỗi phê duyệt chênh lệch";

// cashier shifts
pub const CASHIER_SHIFT_START: &str = "Failed to start cashier shift";
pub const CASHIER_SHIFT_CURRENT: &str = "Failed to fetch current cashier shift";
pub const CASHIER_SHIFTS_LOAD: &str = "Failed to fetch cashier shifts";
pub const CASHIER_SHIFT_LOAD: &str = "Failed to fetch cashier shift";
pub const CLOSURE_INITIATE: &str = "Failed to initiate shift closure";
pub const CLOSURE_RECORD_CASH: &str = "Failed to record actual cash";
pub const CLOSURE_DOCUMENT_VARIANCE: &str = "Failed to document variance";
pub const CLOSURE_CONFIRM: &str = "Failed to confirm responsibility";
pub const CLOSURE_CLOSE: &str = "Failed to close shift";
pub const WAITER_SHIFTS_CHECK: &str = "Failed to check waiter shifts";
pub const NO_CASHIER_SHIFT: &str = "No open cashier shift";

// auth
pub const LOGIN_FAILED: &str = "Đăng nhập thất bại";
pub const INVALID_LOGIN_RESPONSE: &str = "Invalid response format";
pub const SESSION_SAVE: &str = "Không thể lưu phiên đăng nhập";

// orders
pub const ORDERS_LOAD: &str = "Lỗi tải orders";
pub const ORDER_LOAD: &str = "Lỗi tải order";
pub const ORDER_CREATE: &str = "Lỗi tạo order";
pub const ORDER_PAYMENT: &str = "Lỗi thu tiền";
pub const ORDER_EDIT: &str = "Lỗi chỉnh sửa order";
pub const ORDER_SEND: &str = "Lỗi gửi quầy bar";
pub const ORDER_SERVE: &str = "Lỗi phục vụ";
pub const ORDER_CANCEL: &str = "Lỗi hủy order";
pub const ORDER_REFUND: &str = "Lỗi hoàn tiền";
pub const ORDER_UPDATE: &str = "Lỗi cập nhật order";
pub const ORDER_DELETE: &str = "Lỗi xóa order";

// barista
pub const QUEUE_LOAD: &str = "Lỗi tải queue";
pub const ORDER_ACCEPT: &str = "Lỗi nhận order";
pub const ORDER_READY: &str = "Lỗi đánh dấu hoàn tất";

// ingredients
pub const INGREDIENTS: crate::services::CrudMessages = crate::services::CrudMessages {
    load: "Lỗi tải nguyên liệu",
    create: "Lỗi tạo nguyên liệu",
    update: "Lỗi cập nhật nguyên liệu",
    delete: "Lỗi xóa nguyên liệu",
};
pub const INGREDIENT_CATEGORIES: crate::services::CrudMessages = crate::services::CrudMessages {
    load: "Lỗi tải danh mục",
    create: "Lỗi tạo danh mục",
    update: "Lỗi cập nhật danh mục",
    delete: "Lỗi xóa danh mục",
};
pub const LOW_STOCK_LOAD: &str = "Lỗi tải nguyên liệu sắp hết";
pub const STOCK_HISTORY_LOAD: &str = "Lỗi tải lịch sử tồn kho";
pub const STOCK_ADJUST: &str = "Lỗi điều chỉnh tồn kho";

// facilities
pub const FACILITIES: crate::services::CrudMessages = crate::services::CrudMessages {
    load: "Lỗi tải cơ sở vật chất",
    create: "Lỗi tạo tài sản",
    update: "Lỗi cập nhật tài sản",
    delete: "Lỗi xóa tài sản",
};
pub const FACILITY_MOVE: &str = "Lỗi di chuyển tài sản";
pub const FACILITY_CAN_DELETE: &str = "Lỗi kiểm tra quyền xóa";
pub const STATUS_ALERTS_LOAD: &str = "Lỗi tải cảnh báo trạng thái";
pub const FACILITIES_BY_STATUS_LOAD: &str = "Lỗi tải tài sản theo trạng thái";
pub const FACILITIES_BY_AREA_LOAD: &str = "Lỗi tải tài sản theo khu vực";
pub const FACILITY_HISTORY_LOAD: &str = "Lỗi tải lịch sử";
pub const MAINTENANCE_HISTORY_LOAD: &str = "Lỗi tải lịch sử bảo trì";
pub const MAINTENANCE_CREATE: &str = "Lỗi tạo bảo trì";
pub const MAINTENANCE_SCHEDULE_LOAD: &str = "Lỗi tải lịch bảo trì";
pub const ISSUE_REPORT_CREATE: &str = "Lỗi tạo báo cáo sự cố";
pub const ISSUE_REPORTS_LOAD: &str = "Lỗi tải báo cáo sự cố";
pub const FACILITY_SEARCH: &str = "Lỗi tìm kiếm tài sản";

// expenses
pub const EXPENSES: crate::services::CrudMessages = crate::services::CrudMessages {
    load: "Lỗi tải chi phí",
    create: "Lỗi tạo chi phí",
    update: "Lỗi cập nhật chi phí",
    delete: "Lỗi xóa chi phí",
};
pub const EXPENSE_CATEGORIES: crate::services::CrudMessages = crate::services::CrudMessages {
    load: "Lỗi tải danh mục chi phí",
    create: "Lỗi tạo danh mục chi phí",
    update: "Lỗi cập nhật danh mục chi phí",
    delete: "Lỗi xóa danh mục chi phí",
};
pub const RECURRING_EXPENSES: crate::services::CrudMessages = crate::services::CrudMessages {
    load: "Lỗi tải chi phí định kỳ",
    create: "Lỗi tạo chi phí định kỳ",
    update: "Lỗi cập nhật chi phí định kỳ",
    delete: "Lỗi xóa chi phí định kỳ",
};
pub const PREPAID_EXPENSES: crate::services::CrudMessages = crate::services::CrudMessages {
    load: "Lỗi tải chi phí trả trước",
    create: "Lỗi tạo chi phí trả trước",
    update: "Lỗi cập nhật chi phí trả trước",
    delete: "Lỗi xóa chi phí trả trước",
};
pub const EXPENSE_REPORT_LOAD: &str = "Lỗi tải báo cáo";

// users
pub const USERS: crate::services::CrudMessages = crate::services::CrudMessages {
    load: "Lỗi tải danh sách user",
    create: "Lỗi tạo user",
    update: "Lỗi cập nhật user",
    delete: "Lỗi xóa user",
};
pub const USER_RESET_PASSWORD: &str = "Lỗi reset password";
pub const USER_TOGGLE_STATUS: &str = "Lỗi thay đổi trạng thái user";
pub const USERS_BY_ROLE_LOAD: &str = "Lỗi tải users theo role";
pub const ACTIVE_USERS_LOAD: &str = "Lỗi tải active users";
pub const PROFILE_LOAD: &str = "Lỗi tải thông tin user";
pub const PASSWORD_CHANGE: &str = "Lỗi đổi mật khẩu";

// tables & menu
pub const TABLES: crate::services::CrudMessages = crate::services::CrudMessages {
    load: "Lỗi tải bàn",
    create: "Lỗi tạo bàn",
    update: "Lỗi cập nhật bàn",
    delete: "Lỗi xóa bàn",
};
pub const MENU: crate::services::CrudMessages = crate::services::CrudMessages {
    load: "Lỗi tải menu",
    create: "Lỗi tạo món",
    update: "Lỗi cập nhật món",
    delete: "Lỗi xóa món",
};
pub const ORDERS: crate::services::CrudMessages = crate::services::CrudMessages {
    load: ORDERS_LOAD,
    create: ORDER_CREATE,
    update: ORDER_UPDATE,
    delete: ORDER_DELETE,
};
