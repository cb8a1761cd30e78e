use crate::domain::rules::Difficulty;
use crate::domain::scoring::calculate_score;

#[test]
fn easy_worked_example() {
    // base=100, bonus=max(0,100-90)=10, perfect=8, penalty=max(0,5*12)=60
    assert_eq!(calculate_score(45, 20, Difficulty::Easy, true), 50);
}

#[test]
fn zero_second_completion_scores_double_base() {
    // No upper clamp: bonus equals base when time is 0.
    assert_eq!(calculate_score(0, 8, Difficulty::Easy, true), 200);
    assert_eq!(calculate_score(0, 18, Difficulty::Medium, true), 400);
    assert_eq!(calculate_score(0, 32, Difficulty::Hard, true), 600);
}

#[test]
fn incomplete_game_scores_zero() {
    assert_eq!(calculate_score(45, 20, Difficulty::Easy, false), 0);
    assert_eq!(calculate_score(0, 0, Difficulty::Hard, false), 0);
}

#[test]
fn perfect_moves_incur_no_penalty() {
    // perfect_moves equals total_pairs for every difficulty
    assert_eq!(calculate_score(50, 8, Difficulty::Easy, true), 100);
    assert_eq!(calculate_score(100, 18, Difficulty::Medium, true), 200);
    assert_eq!(calculate_score(150, 32, Difficulty::Hard, true), 300);
}

#[test]
fn fewer_moves_than_perfect_is_not_rewarded() {
    // penalty clamps at 0, it never becomes a bonus
    assert_eq!(
        calculate_score(50, 4, Difficulty::Easy, true),
        calculate_score(50, 8, Difficulty::Easy, true)
    );
}

#[test]
fn heavy_penalty_clamps_final_score_at_zero() {
    // base=100, bonus=10, penalty=5*(100-8)=460 -> clamped to 0
    assert_eq!(calculate_score(45, 100, Difficulty::Easy, true), 0);
}

#[test]
fn time_bonus_clamps_before_the_final_sum() {
    // At 100s the raw bonus is -100. A single merged clamp would yield
    // max(0, 100 - 100 - 0) = 0; the two-stage formula clamps the bonus
    // to 0 first and keeps the base: score = 100.
    assert_eq!(calculate_score(100, 8, Difficulty::Easy, true), 100);
}

#[test]
fn slow_game_still_keeps_base_minus_penalty() {
    // bonus exhausted (t >= base/2), 2 extra moves -> 100 - 10
    assert_eq!(calculate_score(60, 10, Difficulty::Easy, true), 90);
}
