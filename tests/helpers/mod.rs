// ==========================================
// 集成测试共享辅助
// ==========================================

pub mod candidate_builder;
pub mod mock_collaborators;
